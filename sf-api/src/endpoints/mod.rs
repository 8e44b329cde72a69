//! API endpoint modules organized by resource.
//!
//! Each module shapes query parameters for one resource and delegates to
//! [`ApiClient::execute`](crate::ApiClient::execute). Other REST resources
//! are reachable through `execute` directly.

pub mod devices;
pub mod messages;
