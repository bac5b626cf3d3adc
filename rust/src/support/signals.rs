/// Exits the process on SIGINT, SIGTERM or SIGHUP (Ctrl+C elsewhere).
pub fn install_signal_handlers() {
    #[cfg(unix)]
    install_unix_signal_handlers();

    #[cfg(not(unix))]
    install_ctrl_c_handler();
}

#[cfg(unix)]
fn install_unix_signal_handlers() {
    use tokio::signal::unix::{signal, SignalKind};

    for (name, kind) in [
        ("SIGINT", SignalKind::interrupt()),
        ("SIGTERM", SignalKind::terminate()),
        ("SIGHUP", SignalKind::hangup()),
    ] {
        match signal(kind) {
            Ok(mut sig) => {
                tokio::spawn(async move {
                    sig.recv().await;
                    tracing::info!("Caught {name}. Exiting...");
                    std::process::exit(0);
                });
            }
            Err(err) => tracing::warn!("Failed to install {name} handler: {err}"),
        }
    }
}

#[cfg(not(unix))]
fn install_ctrl_c_handler() {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Caught CTRL+C. Exiting...");
            std::process::exit(0);
        }
    });
}
