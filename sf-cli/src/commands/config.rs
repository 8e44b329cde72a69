//! Configuration commands.

use std::path::Path;

use clap::Subcommand;
use console::style;

use sf_core::config::{AppConfig, ConfigHandle};
use sf_core::error::SfResult;

use crate::OutputFormat;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration (password masked).
    Show,
    /// Write API credentials to the configuration file.
    Init {
        /// API login.
        #[arg(long)]
        login: String,
        /// API password.
        #[arg(long)]
        password: String,
        /// API base URL.
        #[arg(long)]
        base_url: Option<String>,
    },
}

fn masked(config: &AppConfig) -> AppConfig {
    let mut config = config.clone();
    if !config.api.password.is_empty() {
        config.api.password = "********".to_string();
    }
    config
}

pub async fn run(
    config: ConfigHandle,
    path: &Path,
    action: ConfigAction,
    format: OutputFormat,
) -> SfResult<()> {
    match action {
        ConfigAction::Show => {
            let cfg = masked(&*config.read().await);
            match format {
                OutputFormat::Json => {
                    let value = serde_json::to_value(&cfg)?;
                    super::print_json(&value);
                }
                OutputFormat::Text => {
                    println!("{} {}", style("config file:").bold(), path.display());
                    println!("  base url:      {}", cfg.api.base_url);
                    println!("  login:         {}", cfg.api.login);
                    println!("  password:      {}", cfg.api.password);
                    println!("  timeout:       {} ms", cfg.api.timeout_ms);
                    println!(
                        "  rate limit:    {} s (device messages), max retries {}",
                        cfg.rate_limit.device_messages_delay_secs,
                        cfg.rate_limit
                            .retry_limit()
                            .map(|n| n.to_string())
                            .unwrap_or_else(|| "unlimited".to_string())
                    );
                    println!("  log level:     {}", cfg.logging.level);
                }
            }
        }
        ConfigAction::Init { login, password, base_url } => {
            let mut cfg = config.write().await;
            cfg.api.login = login;
            cfg.api.password = password;
            if let Some(url) = base_url {
                cfg.api.base_url = AppConfig::sanitize_base_url(&url);
            }
            cfg.save_to_file(path)?;
            println!("{} {}", style("saved").green(), path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masked() {
        let mut cfg = AppConfig::default();
        assert_eq!(masked(&cfg).api.password, "");
        cfg.api.password = "secret".into();
        assert_eq!(masked(&cfg).api.password, "********");
    }
}
