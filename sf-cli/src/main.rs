//! Sigfox CLI - command-line access to the Sigfox v2 REST API.
//!
//! Lists devices and device messages, fetches single devices, and issues
//! raw GET requests, following pagination when asked to.

mod commands;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::debug;

use sf_core::config::{AppConfig, ConfigHandle};
use sf_core::error::SfResult;
use sf_core::logging;

/// Sigfox - device and message telemetry from the command line.
#[derive(Parser)]
#[command(
    name = "sigfox",
    version,
    about = "Sigfox v2 API client CLI",
    long_about = "A command-line interface for the Sigfox v2 REST API.\n\
                  Credentials are read from the config file (see `sigfox config init`)."
)]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json).
    #[arg(short = 'f', long, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output for scripting.
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// List and inspect devices.
    Devices {
        #[command(subcommand)]
        action: commands::devices::DevicesAction,
    },
    /// List device messages.
    Messages {
        #[command(subcommand)]
        action: commands::messages::MessagesAction,
    },
    /// GET an arbitrary API route.
    Request {
        /// Route relative to the API base URL, e.g. "device-types".
        route: String,
        /// Query parameter as key=value. Repeatable.
        #[arg(short, long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,
        /// Follow pagination and print every page.
        #[arg(short, long)]
        all: bool,
        /// Seconds to wait and retry after HTTP 429 while following pages.
        /// Without it, rate limiting aborts the walk.
        #[arg(long, value_name = "SECS", requires = "all")]
        rate_limit_delay: Option<u64>,
    },
    /// Show or initialize the configuration file.
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn load_config(path: Option<&Path>) -> SfResult<(AppConfig, PathBuf)> {
    match path {
        Some(p) if p.exists() => Ok((AppConfig::load_from_file(p)?, p.to_path_buf())),
        Some(p) => Ok((AppConfig::default(), p.to_path_buf())),
        None => Ok((AppConfig::load_default()?, AppConfig::default_config_path()?)),
    }
}

#[tokio::main]
async fn main() -> SfResult<()> {
    let cli = Cli::parse();

    let (config, config_path) = load_config(cli.config.as_deref())?;

    let log_level = if cli.verbose {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    };
    let log_dir = config.effective_log_dir()?;
    let _guard = logging::init_logging(&log_level, &log_dir, config.logging.json_output)?;

    debug!(
        "sigfox CLI v{}, config {}",
        sf_core::constants::APP_VERSION,
        config_path.display()
    );

    let config_handle = ConfigHandle::new(config);

    match cli.command {
        Commands::Devices { action } => {
            commands::devices::run(config_handle, action, cli.format).await
        }
        Commands::Messages { action } => {
            commands::messages::run(config_handle, action, cli.format).await
        }
        Commands::Request {
            route,
            params,
            all,
            rate_limit_delay,
        } => {
            commands::request::run(config_handle, route, params, all, rate_limit_delay, cli.format)
                .await
        }
        Commands::Config { action } => {
            commands::config::run(config_handle, &config_path, action, cli.format).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let (config, loaded_from) = load_config(Some(path.as_path())).unwrap();
        assert_eq!(loaded_from, path);
        assert!(!config.is_api_configured());

        std::fs::write(&path, "[api]\nlogin = \"user\"\npassword = \"pw\"\n").unwrap();
        let (config, _) = load_config(Some(path.as_path())).unwrap();
        assert_eq!(config.api.login, "user");
    }

    #[test]
    fn test_rate_limit_delay_requires_all() {
        assert!(Cli::try_parse_from(["sigfox", "request", "devices", "--rate-limit-delay", "1"]).is_err());
        let cli = Cli::try_parse_from(["sigfox", "request", "devices", "--all", "--rate-limit-delay", "1"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Request {
                all: true,
                rate_limit_delay: Some(1),
                ..
            }
        ));
    }
}
