//! Error types for the Sigfox client.
//!
//! The transport taxonomy (connection failure, rate limiting, bad status,
//! malformed body) lives alongside the ambient configuration and I/O errors
//! in a single `SfError` enum.

use thiserror::Error;

/// Convenience type alias for Results using SfError.
pub type SfResult<T> = Result<T, SfError>;

/// Unified error type for every Sigfox crate.
#[derive(Error, Debug)]
pub enum SfError {
    // -- Transport errors --
    /// The server could not be reached.
    #[error("connection error: {0}")]
    Connection(String),

    /// The server answered HTTP 429.
    #[error("too many requests")]
    TooManyRequests,

    /// The server answered with a status other than 200 or 429.
    #[error("bad status {status}: {body}")]
    BadStatus {
        /// HTTP status code.
        status: u16,
        /// Raw response text.
        body: String,
    },

    /// The response body could not be decoded as JSON.
    #[error("response error: {message}")]
    Response {
        /// Decoder message.
        message: String,
        /// Raw response text.
        body: String,
    },

    /// The request timed out.
    #[error("request timeout: {0}")]
    Timeout(String),

    /// Any other transport-level failure.
    #[error("http error: {0}")]
    Http(String),

    // -- Configuration errors --
    /// Failed to load or parse configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// A required configuration value is missing.
    #[error("missing configuration: {0}")]
    MissingConfig(String),

    // -- Data errors --
    /// Serialization, deserialization or decoding error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// File system operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapping anyhow errors for interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SfError {
    /// Whether this error is the server's rate-limit signal.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, SfError::TooManyRequests)
    }

    /// The HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            SfError::TooManyRequests => Some(429),
            SfError::BadStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SfError {
    fn from(e: serde_json::Error) -> Self {
        SfError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for SfError {
    fn from(e: toml::de::Error) -> Self {
        SfError::Config(e.to_string())
    }
}

impl From<hex::FromHexError> for SfError {
    fn from(e: hex::FromHexError) -> Self {
        SfError::Serialization(format!("invalid hex: {e}"))
    }
}
