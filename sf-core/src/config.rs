//! Application configuration management.
//!
//! Handles loading, saving, and accessing the client configuration: API
//! endpoint and credentials, rate-limit policy and logging preferences.
//! Configuration is persisted as TOML on disk.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::constants;
use crate::error::{SfError, SfResult};
use crate::paths;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// API connection settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Rate-limit handling for paginated endpoints.
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// API connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every route is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API login (basic-auth user).
    #[serde(default)]
    pub login: String,

    /// API password (basic-auth password).
    #[serde(default)]
    pub password: String,

    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,

    /// Extra HTTP headers sent with every request.
    #[serde(default)]
    pub custom_headers: std::collections::HashMap<String, String>,
}

/// Rate-limit configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Seconds to wait after a 429 on the device messages endpoint.
    #[serde(default = "default_device_messages_delay")]
    pub device_messages_delay_secs: u64,

    /// Maximum consecutive 429 retries per page. 0 means unlimited.
    #[serde(default)]
    pub max_retries: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for log files. If empty, uses default location.
    #[serde(default)]
    pub directory: String,

    /// Enable JSON structured logging output.
    #[serde(default)]
    pub json_output: bool,
}

fn default_base_url() -> String {
    constants::DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    constants::DEFAULT_TIMEOUT_MS
}

fn default_device_messages_delay() -> u64 {
    constants::RATE_LIMIT_DEVICE_MESSAGES_SECS
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            login: String::new(),
            password: String::new(),
            timeout_ms: default_timeout(),
            custom_headers: std::collections::HashMap::new(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            device_messages_delay_secs: default_device_messages_delay(),
            max_retries: 0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: String::new(),
            json_output: false,
        }
    }
}

impl ApiConfig {
    /// Request timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl RateLimitConfig {
    /// Delay applied after a 429 on the device messages endpoint.
    pub fn device_messages_delay(&self) -> Duration {
        Duration::from_secs(self.device_messages_delay_secs)
    }

    /// Retry bound, `None` when unlimited.
    pub fn retry_limit(&self) -> Option<u32> {
        (self.max_retries > 0).then_some(self.max_retries)
    }
}

impl AppConfig {
    /// Load configuration from the default config file path.
    pub fn load_default() -> SfResult<Self> {
        let path = Self::default_config_path()?;
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from_file(path: &Path) -> SfResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a specific file path.
    pub fn save_to_file(&self, path: &Path) -> SfResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| SfError::Config(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> SfResult<PathBuf> {
        Ok(paths::config_dir()?.join("config.toml"))
    }

    /// Get the effective log directory, using the configured path or the default.
    pub fn effective_log_dir(&self) -> SfResult<PathBuf> {
        if self.logging.directory.is_empty() {
            Ok(paths::data_dir()?.join("logs"))
        } else {
            Ok(PathBuf::from(&self.logging.directory))
        }
    }

    /// Check whether API credentials are configured.
    pub fn is_api_configured(&self) -> bool {
        !self.api.login.is_empty() && !self.api.password.is_empty()
    }

    /// Fail with `MissingConfig` unless credentials are present.
    pub fn require_credentials(&self) -> SfResult<()> {
        if self.api.login.is_empty() {
            return Err(SfError::MissingConfig("api.login".into()));
        }
        if self.api.password.is_empty() {
            return Err(SfError::MissingConfig("api.password".into()));
        }
        Ok(())
    }

    /// Normalize a base URL: scheme defaults to https, exactly one trailing slash.
    pub fn sanitize_base_url(address: &str) -> String {
        let trimmed = address.trim().trim_matches('"').trim();
        if trimmed.is_empty() {
            return default_base_url();
        }

        let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed.to_string()
        } else {
            format!("https://{trimmed}")
        };

        format!("{}/", with_scheme.trim_end_matches('/'))
    }
}

/// Thread-safe configuration holder for shared access.
#[derive(Clone)]
pub struct ConfigHandle {
    inner: Arc<RwLock<AppConfig>>,
}

impl ConfigHandle {
    /// Create a new configuration handle.
    pub fn new(config: AppConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    /// Read the configuration.
    pub async fn read(&self) -> tokio::sync::RwLockReadGuard<'_, AppConfig> {
        self.inner.read().await
    }

    /// Write/update the configuration.
    pub async fn write(&self) -> tokio::sync::RwLockWriteGuard<'_, AppConfig> {
        self.inner.write().await
    }
}
