//! Sigfox Models - typed records decoded from API payloads.
//!
//! The API layer hands back raw JSON; these types give callers typed access
//! to the device and message fields plus the documented code tables.

pub mod codes;
pub mod records;

// Re-export key types
pub use codes::{ComState, DeviceState, Lqi};
pub use records::device::Device;
pub use records::message::DeviceMessage;
