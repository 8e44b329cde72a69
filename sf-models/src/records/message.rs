//! Device message record.

use chrono::{DateTime, Utc};
use serde::Serialize;

use sf_core::codec::{from_ms_timestamp, to_bytes};
use sf_core::error::{SfError, SfResult};

use super::device::nested_id;
use crate::codes::Lqi;

/// An uplink message as returned by `GET /devices/{id}/messages`.
///
/// Built with [`DeviceMessage::from_server_map`]; serializes with the wire's
/// camelCase field names.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceMessage {
    pub device_id: String,
    /// Reception time, epoch milliseconds.
    pub time: i64,
    /// Payload as a hex string.
    pub data: Option<String>,
    pub lqi: Option<Lqi>,
    pub seq_number: Option<i64>,

    #[serde(skip)]
    pub raw: serde_json::Value,
}

impl DeviceMessage {
    /// Create a DeviceMessage from a server JSON map.
    pub fn from_server_map(map: &serde_json::Value) -> SfResult<Self> {
        let device_id = nested_id(map, "device")
            .ok_or_else(|| SfError::Serialization("message missing device.id".into()))?;
        let time = map
            .get("time")
            .and_then(|v| v.as_i64())
            .ok_or_else(|| SfError::Serialization("message missing time".into()))?;

        Ok(Self {
            device_id,
            time,
            data: map.get("data").and_then(|v| v.as_str()).map(String::from),
            lqi: map.get("lqi").and_then(|v| v.as_i64()).map(Lqi::from_code),
            seq_number: map.get("seqNumber").and_then(|v| v.as_i64()),
            raw: map.clone(),
        })
    }

    /// Reception time.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        from_ms_timestamp(Some(self.time))
    }

    /// Decoded payload bytes. `None` when the message carries no data.
    pub fn payload(&self) -> SfResult<Option<Vec<u8>>> {
        to_bytes(self.data.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> serde_json::Value {
        json!({
            "device": {"id": "device_1"},
            "time": 1_613_984_321_000_i64,
            "data": "010ea00cc764",
            "lqi": 2,
            "seqNumber": 17,
        })
    }

    #[test]
    fn test_from_server_map() {
        let msg = DeviceMessage::from_server_map(&sample()).unwrap();
        assert_eq!(msg.device_id, "device_1");
        assert_eq!(msg.lqi, Some(Lqi::Good));
        assert_eq!(msg.seq_number, Some(17));
        assert_eq!(
            msg.timestamp().unwrap().to_rfc3339(),
            "2021-02-22T08:58:41+00:00"
        );
        assert_eq!(
            msg.payload().unwrap().unwrap(),
            vec![0x01, 0x0e, 0xa0, 0x0c, 0xc7, 0x64]
        );
    }

    #[test]
    fn test_message_without_data() {
        let msg = DeviceMessage::from_server_map(&json!({
            "device": {"id": "d"},
            "time": 0,
        }))
        .unwrap();
        assert_eq!(msg.payload().unwrap(), None);
    }

    #[test]
    fn test_missing_fields() {
        assert!(DeviceMessage::from_server_map(&json!({"time": 0})).is_err());
        assert!(DeviceMessage::from_server_map(&json!({"device": {"id": "d"}})).is_err());
    }

    #[test]
    fn test_serializes_camel_case() {
        let msg = DeviceMessage::from_server_map(&sample()).unwrap();
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["seqNumber"], 17);
        assert_eq!(value["deviceId"], "device_1");
        assert_eq!(value["lqi"], 2);
    }
}
