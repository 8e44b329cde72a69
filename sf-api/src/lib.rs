//! Sigfox API - HTTP client for the Sigfox v2 REST API.
//!
//! Authenticates every request with basic auth, classifies responses into
//! the `SfError` taxonomy and walks cursor-based pagination. Each call
//! returns a [`Page`] whose optional [`Cursor`] fetches the next page;
//! [`Pages`] and [`drain_all`] follow cursors to exhaustion while absorbing
//! 429 responses according to a [`RateLimitPolicy`].

pub mod client;
pub mod endpoints;
pub mod paging;
pub mod request;
pub mod response;

// Re-export key types
pub use client::ApiClient;
pub use endpoints::devices::DeviceQuery;
pub use endpoints::messages::MessageQuery;
pub use paging::{drain_all, Cursor, Page, Pages, RateLimitPolicy};
pub use request::{QueryParams, RequestDescriptor, RequestOptions};
pub use response::Envelope;
