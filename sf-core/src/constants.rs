//! Client-wide constants.

/// Application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Directory name used under the platform config/data directories.
pub const APP_DIR_NAME: &str = "Sigfox";

/// Base URL of the v2 REST API.
pub const DEFAULT_BASE_URL: &str = "https://api.sigfox.com/v2/";

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Connect timeout in seconds.
pub const CONNECT_TIMEOUT_SECS: u64 = 15;

/// Rate limit of the device messages endpoint: one query per second.
pub const RATE_LIMIT_DEVICE_MESSAGES_SECS: u64 = 1;

/// Query parameters understood by the paginated endpoints.
pub mod params {
    pub const LIMIT: &str = "limit";
    pub const OFFSET: &str = "offset";
    pub const SINCE: &str = "since";
    pub const BEFORE: &str = "before";
}
