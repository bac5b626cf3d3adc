use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogLevel;

/// Installs the global subscriber. Output goes to stderr; stdout carries
/// protocol frames. `RUST_LOG` overrides the level when set.
pub fn init_telemetry(level: LogLevel) {
    let Some(default_directive) = default_directive(level) else {
        return;
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .with_target(false),
        )
        .try_init();

    if let Err(err) = result {
        eprintln!("[invest-mcp] Failed to install log subscriber: {err}");
    }
}

fn default_directive(level: LogLevel) -> Option<&'static str> {
    match level {
        LogLevel::Debug => Some("invest_mcp=debug,info"),
        LogLevel::Info => Some("info"),
        LogLevel::None => None,
    }
}
