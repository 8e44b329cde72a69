//! Wire value conversions.
//!
//! The API speaks epoch milliseconds for every timestamp and lowercase hex
//! for message payloads. Absent inputs map to absent outputs so callers can
//! pass optional filters straight through.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

use crate::error::SfResult;

/// A value that denotes an instant and can be sent as epoch milliseconds.
///
/// Naive date-times carry no offset and are interpreted as UTC.
pub trait ToMillis {
    fn to_millis(&self) -> i64;
}

impl ToMillis for i64 {
    fn to_millis(&self) -> i64 {
        *self
    }
}

impl<Tz: TimeZone> ToMillis for DateTime<Tz> {
    fn to_millis(&self) -> i64 {
        self.timestamp_millis()
    }
}

impl ToMillis for NaiveDateTime {
    fn to_millis(&self) -> i64 {
        self.and_utc().timestamp_millis()
    }
}

/// Convert an optional instant to epoch milliseconds.
pub fn to_ms_timestamp<T: ToMillis>(value: Option<T>) -> Option<i64> {
    value.map(|v| v.to_millis())
}

/// Convert optional epoch milliseconds to a UTC date-time.
///
/// Values outside chrono's representable range yield `None`.
pub fn from_ms_timestamp(value: Option<i64>) -> Option<DateTime<Utc>> {
    value.and_then(|ms| Utc.timestamp_millis_opt(ms).single())
}

/// Decode an optional hex string (either case) into bytes.
pub fn to_bytes(value: Option<&str>) -> SfResult<Option<Vec<u8>>> {
    value.map(|s| hex::decode(s.trim()).map_err(Into::into)).transpose()
}

/// Encode optional bytes as a lowercase hex string.
pub fn to_hex(value: Option<&[u8]>) -> Option<String> {
    value.map(hex::encode)
}

/// Parse a user-supplied instant: epoch milliseconds, RFC 3339, or a naive
/// ISO-8601 date-time (treated as UTC).
pub fn parse_instant(input: &str) -> Option<i64> {
    let input = input.trim();
    if let Ok(ms) = input.parse::<i64>() {
        return Some(ms);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.to_millis());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .map(|dt| dt.to_millis())
}
