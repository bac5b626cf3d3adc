use clap::{Arg, ArgAction, ArgMatches, Command, ValueEnum};
use std::env;
use std::fmt;

use crate::tool_api::Profile;

pub const DEFAULT_TARGET: &str = "invest-public-api.tinkoff.ru:443";
pub const DEFAULT_APP_NAME: &str = "invest-mcp";
pub const DEFAULT_PROTOCOL_VERSION: &str = "2024-11-05";
const DEFAULT_PROFILES: &[Profile] = &[Profile::Read, Profile::Sandbox];

const TOKEN_ENV: &str = "INVEST_TOKEN";
const APP_NAME_ENV: &str = "INVEST_APP_NAME";
const TARGET_ENV: &str = "INVEST_TARGET";
const PROFILES_ENV: &str = "INVEST_PROFILES";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Debug,
    Info,
    None,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Empty only for commands that never reach the broker.
    pub token: String,
    pub app_name: String,
    pub target: String,
    pub profiles: Vec<Profile>,
    pub log_level: LogLevel,
    pub protocol_version: String,
}

#[derive(Debug, Clone)]
pub struct CallConfig {
    pub config: Config,
    pub tool: String,
    pub arguments: serde_json::Value,
}

#[derive(Debug, Clone)]
pub enum CliCommand {
    Serve(Box<Config>),
    Tools(Box<Config>),
    Call(Box<CallConfig>),
}

#[derive(Debug)]
pub enum ConfigError {
    MissingToken,
    InvalidProfile(String),
    InvalidArguments(String),
    InvalidArg(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingToken => write!(
                f,
                "An API token is required: pass --token or set {TOKEN_ENV}"
            ),
            ConfigError::InvalidProfile(name) => write!(
                f,
                "Unknown profile '{name}'. Expected one of: read, sandbox, trade"
            ),
            ConfigError::InvalidArguments(msg) => write!(f, "Invalid --args JSON: {msg}"),
            ConfigError::InvalidArg(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

pub fn parse_cli_command() -> Result<CliCommand, ConfigError> {
    let raw_args: Vec<String> = env::args().collect();
    parse_cli_command_from(raw_args, |key| env::var(key).ok())
}

fn parse_cli_command_from<E>(raw_args: Vec<String>, lookup_env: E) -> Result<CliCommand, ConfigError>
where
    E: Fn(&str) -> Option<String>,
{
    let matches = build_cli().get_matches_from(raw_args);

    match matches.subcommand() {
        Some(("tools", sub)) => {
            let config = parse_config(sub, &lookup_env, false)?;
            Ok(CliCommand::Tools(Box::new(config)))
        }
        Some(("call", sub)) => {
            let config = parse_config(sub, &lookup_env, true)?;
            let tool = required_arg(sub, "tool")?.to_string();
            let arguments = match sub.get_one::<String>("args") {
                Some(raw) => serde_json::from_str(raw)
                    .map_err(|err| ConfigError::InvalidArguments(err.to_string()))?,
                None => serde_json::Value::Object(Default::default()),
            };
            Ok(CliCommand::Call(Box::new(CallConfig {
                config,
                tool,
                arguments,
            })))
        }
        Some(("serve", sub)) => {
            let config = parse_config(sub, &lookup_env, true)?;
            Ok(CliCommand::Serve(Box::new(config)))
        }
        _ => {
            let config = parse_config(&matches, &lookup_env, true)?;
            Ok(CliCommand::Serve(Box::new(config)))
        }
    }
}

fn parse_config<E>(
    matches: &ArgMatches,
    lookup_env: &E,
    require_token: bool,
) -> Result<Config, ConfigError>
where
    E: Fn(&str) -> Option<String>,
{
    let from_flag_or_env = |key: &str, env_key: &str| {
        matches
            .get_one::<String>(key)
            .cloned()
            .or_else(|| lookup_env(env_key))
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    };

    let token = from_flag_or_env("token", TOKEN_ENV).unwrap_or_default();
    if require_token && token.is_empty() {
        return Err(ConfigError::MissingToken);
    }

    let app_name =
        from_flag_or_env("appName", APP_NAME_ENV).unwrap_or_else(|| DEFAULT_APP_NAME.to_string());
    let target =
        from_flag_or_env("target", TARGET_ENV).unwrap_or_else(|| DEFAULT_TARGET.to_string());

    let profile_flags: Vec<String> = matches
        .get_many::<String>("profile")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let profiles = if profile_flags.is_empty() {
        match lookup_env(PROFILES_ENV) {
            Some(raw) if !raw.trim().is_empty() => parse_profiles(&[raw])?,
            _ => DEFAULT_PROFILES.to_vec(),
        }
    } else {
        parse_profiles(&profile_flags)?
    };

    let log_level = matches
        .get_one::<LogLevel>("logLevel")
        .copied()
        .unwrap_or(LogLevel::Info);
    let protocol_version = matches
        .get_one::<String>("protocolVersion")
        .cloned()
        .unwrap_or_else(|| DEFAULT_PROTOCOL_VERSION.to_string());

    Ok(Config {
        token,
        app_name,
        target,
        profiles,
        log_level,
        protocol_version,
    })
}

/// Accepts repeated values and comma-separated lists. Order is normalized
/// and duplicates dropped. At least one profile must be named.
fn parse_profiles(raw: &[String]) -> Result<Vec<Profile>, ConfigError> {
    let mut profiles = Vec::new();
    for part in raw.iter().flat_map(|value| value.split(',')) {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let profile = Profile::from_str(part, true)
            .map_err(|_| ConfigError::InvalidProfile(part.to_string()))?;
        profiles.push(profile);
    }
    if profiles.is_empty() {
        return Err(ConfigError::InvalidProfile(raw.join(",")));
    }
    profiles.sort();
    profiles.dedup();
    Ok(profiles)
}

fn build_cli() -> Command {
    Command::new("invest-mcp")
        .about("Expose the T-Invest trading API as MCP tools over stdio")
        .version(env!("CARGO_PKG_VERSION"))
        .args(common_args())
        .subcommand(Command::new("serve").about("Serve MCP over stdin/stdout (default)"))
        .subcommand(
            Command::new("tools").about("Print the tools enabled by the active profiles"),
        )
        .subcommand(
            Command::new("call")
                .about("Invoke one tool and print its result")
                .arg(Arg::new("tool").required(true).value_name("TOOL"))
                .arg(Arg::new("args").long("args").value_name("JSON")),
        )
}

/// Accepted before or after the subcommand name.
fn common_args() -> Vec<Arg> {
    vec![
        Arg::new("token").long("token").value_name("TOKEN"),
        Arg::new("appName").long("appName").value_name("NAME"),
        Arg::new("target").long("target").value_name("HOST:PORT"),
        Arg::new("profile")
            .long("profile")
            .action(ArgAction::Append)
            .value_name("read|sandbox|trade"),
        Arg::new("logLevel")
            .long("logLevel")
            .value_parser(clap::builder::EnumValueParser::<LogLevel>::new())
            .default_value("info"),
        Arg::new("protocolVersion")
            .long("protocolVersion")
            .default_value(DEFAULT_PROTOCOL_VERSION),
    ]
    .into_iter()
    .map(|arg| arg.global(true))
    .collect()
}

fn required_arg<'a>(matches: &'a ArgMatches, key: &str) -> Result<&'a str, ConfigError> {
    matches
        .get_one::<String>(key)
        .map(String::as_str)
        .ok_or_else(|| ConfigError::InvalidArg(format!("Missing required arg {key}")))
}
