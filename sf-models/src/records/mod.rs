//! Record types decoded from API payloads.

pub mod device;
pub mod message;
