use std::sync::Arc;

use invest_mcp::config::{parse_cli_command, CallConfig, CliCommand, Config};
use invest_mcp::gateways::stdio::{self, McpServer};
use invest_mcp::invest::InvestApi;
use invest_mcp::support::telemetry::init_telemetry;
use invest_mcp::tool_api::{Profile, ToolRegistry};
use invest_mcp::tools::catalog;

#[tokio::main]
async fn main() {
    let cli_command = match parse_cli_command() {
        Ok(command) => command,
        Err(err) => {
            eprintln!("[invest-mcp] Error: {err}");
            std::process::exit(1);
        }
    };

    // tonic picks the TLS backend from the process-wide provider.
    let _ = rustls::crypto::ring::default_provider().install_default();

    match cli_command {
        CliCommand::Serve(config) => {
            init_telemetry(config.log_level);
            if let Err(err) = run_server(*config).await {
                tracing::error!("Fatal error: {err}");
                std::process::exit(1);
            }
        }
        CliCommand::Tools(config) => {
            if let Err(err) = print_tools(&config) {
                eprintln!("[invest-mcp] Error: {err}");
                std::process::exit(1);
            }
        }
        CliCommand::Call(call) => {
            init_telemetry(call.config.log_level);
            if let Err(err) = run_call(*call).await {
                eprintln!("[invest-mcp] Error: {err}");
                std::process::exit(1);
            }
        }
    }
}

async fn run_server(config: Config) -> Result<(), String> {
    tracing::info!("Starting...");
    tracing::info!("  - target: {}", config.target);
    tracing::info!("  - appName: {}", config.app_name);
    tracing::info!("  - profiles: {}", profile_labels(&config.profiles));

    let registry = build_registry(&config)?;
    let server = McpServer::new(registry, config.protocol_version.clone());
    stdio::run(server).await
}

async fn run_call(call: CallConfig) -> Result<(), String> {
    let registry = build_registry(&call.config)?;
    let text = registry
        .call(&call.tool, Some(&call.arguments))
        .await
        .map_err(|err| err.to_string())?;
    println!("{text}");
    Ok(())
}

fn print_tools(config: &Config) -> Result<(), String> {
    // The channel is lazy, so listing works without credentials or network.
    let registry = build_registry(config)?;
    for tool in registry.list() {
        let name = tool.get("name").and_then(|v| v.as_str()).unwrap_or_default();
        let description = tool
            .get("description")
            .and_then(|v| v.as_str())
            .unwrap_or_default();
        println!("{name}\n    {description}");
    }
    Ok(())
}

fn build_registry(config: &Config) -> Result<ToolRegistry, String> {
    let api = InvestApi::connect_lazy(&config.target, &config.token, &config.app_name)?;
    ToolRegistry::new(catalog(), &config.profiles, Arc::new(api))
}

fn profile_labels(profiles: &[Profile]) -> String {
    profiles
        .iter()
        .map(|profile| profile.as_str())
        .collect::<Vec<_>>()
        .join(",")
}
