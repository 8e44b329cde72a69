//! Device record.

use chrono::{DateTime, Utc};
use serde::Serialize;

use sf_core::codec::from_ms_timestamp;
use sf_core::error::{SfError, SfResult};

use crate::codes::{ComState, DeviceState, Lqi};

/// A device as returned by `GET /devices` and `GET /devices/{id}`.
///
/// Built with [`Device::from_server_map`]; serializes with the wire's
/// camelCase field names.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: String,
    pub name: Option<String>,
    /// Last communication time, epoch milliseconds.
    pub last_com: Option<i64>,
    pub state: Option<DeviceState>,
    pub com_state: Option<ComState>,
    pub device_type_id: Option<String>,
    pub group_id: Option<String>,
    pub lqi: Option<Lqi>,

    /// The untouched server object, for fields not mapped above.
    #[serde(skip)]
    pub raw: serde_json::Value,
}

impl Device {
    /// Create a Device from a server JSON map.
    pub fn from_server_map(map: &serde_json::Value) -> SfResult<Self> {
        let id = map
            .get("id")
            .and_then(|v| v.as_str())
            .ok_or_else(|| SfError::Serialization("device missing id".into()))?
            .to_string();

        Ok(Self {
            id,
            name: map.get("name").and_then(|v| v.as_str()).map(String::from),
            last_com: map.get("lastCom").and_then(|v| v.as_i64()),
            state: map.get("state").and_then(|v| v.as_i64()).map(DeviceState::from_code),
            com_state: map.get("comState").and_then(|v| v.as_i64()).map(ComState::from_code),
            device_type_id: nested_id(map, "deviceType"),
            group_id: nested_id(map, "group"),
            lqi: map.get("lqi").and_then(|v| v.as_i64()).map(Lqi::from_code),
            raw: map.clone(),
        })
    }

    /// Last communication time.
    pub fn last_seen(&self) -> Option<DateTime<Utc>> {
        from_ms_timestamp(self.last_com)
    }

    /// Display name, falling back to the id.
    pub fn title(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// Read `{ "<key>": { "id": "..." } }`.
pub(crate) fn nested_id(map: &serde_json::Value, key: &str) -> Option<String> {
    map.get(key)
        .and_then(|v| v.get("id"))
        .and_then(|v| v.as_str())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_server_map() {
        let map = json!({
            "id": "device_1",
            "name": "Boiler room",
            "lastCom": 1_559_802_207_000_i64,
            "state": 0,
            "comState": 5,
            "deviceType": {"id": "1"},
            "group": {"id": "2"},
            "lqi": 4,
        });
        let device = Device::from_server_map(&map).unwrap();
        assert_eq!(device.id, "device_1");
        assert_eq!(device.title(), "Boiler room");
        assert_eq!(device.state, Some(DeviceState::Ok));
        assert_eq!(device.com_state, Some(ComState::NotSeen));
        assert_eq!(device.lqi, Some(Lqi::NotAvailable));
        assert_eq!(device.device_type_id.as_deref(), Some("1"));
        assert_eq!(device.group_id.as_deref(), Some("2"));
        assert_eq!(device.last_seen().unwrap().timestamp_millis(), 1_559_802_207_000);
    }

    #[test]
    fn test_missing_id() {
        assert!(Device::from_server_map(&json!({"name": "x"})).is_err());
    }

    #[test]
    fn test_title_falls_back_to_id() {
        let device = Device::from_server_map(&json!({"id": "abc"})).unwrap();
        assert_eq!(device.title(), "abc");
        assert!(device.last_seen().is_none());
    }

    #[test]
    fn test_serializes_camel_case() {
        let device = Device::from_server_map(&json!({
            "id": "abc",
            "lastCom": 5,
            "comState": 1,
        }))
        .unwrap();
        let value = serde_json::to_value(&device).unwrap();
        assert_eq!(value["lastCom"], 5);
        assert_eq!(value["comState"], 1);
        assert!(value.get("last_com").is_none());
        assert!(value.get("raw").is_none());
    }
}
