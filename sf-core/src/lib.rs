//! Sigfox Core - configuration, errors, logging and wire codecs.
//!
//! This crate provides the shared foundation used by the other Sigfox crates:
//! - Client configuration (API endpoint, credentials, rate-limit policy)
//! - The error taxonomy raised by the transport layer
//! - Structured logging with tracing
//! - Epoch-millisecond and hex conversions

pub mod codec;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod paths;

// Re-export commonly used items at the crate root
pub use codec::ToMillis;
pub use config::AppConfig;
pub use error::{SfError, SfResult};
pub use logging::init_logging;
