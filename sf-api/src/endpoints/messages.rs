//! Device message endpoints.

use serde_json::Value;

use sf_core::codec::ToMillis;
use sf_core::constants::params;
use sf_core::error::SfResult;
use sf_models::DeviceMessage;

use crate::client::ApiClient;
use crate::paging::{drain_all, Page, RateLimitPolicy};
use crate::request::{QueryParams, RequestDescriptor};

/// Filters for listing a device's messages.
///
/// Messages are returned newest first. `since` and `before` accept epoch
/// milliseconds or any date-time; naive date-times are taken as UTC.
#[derive(Debug, Clone, Default)]
pub struct MessageQuery {
    /// Follow pagination and return every message in the window.
    pub list_all: bool,
    pub since: Option<i64>,
    pub before: Option<i64>,
    pub limit: Option<u32>,
    /// Additional parameters passed through as-is.
    pub extra: QueryParams,
}

impl MessageQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain every page.
    pub fn all(mut self) -> Self {
        self.list_all = true;
        self
    }

    /// Only messages received at or after `instant`.
    pub fn since<T: ToMillis>(mut self, instant: T) -> Self {
        self.since = Some(instant.to_millis());
        self
    }

    /// Only messages received before `instant`.
    pub fn before<T: ToMillis>(mut self, instant: T) -> Self {
        self.before = Some(instant.to_millis());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    fn to_params(&self) -> QueryParams {
        let mut query = self.extra.clone();
        if let Some(since) = self.since {
            query.insert(params::SINCE.into(), since.to_string());
        }
        if let Some(before) = self.before {
            query.insert(params::BEFORE.into(), before.to_string());
        }
        if let Some(limit) = self.limit {
            query.insert(params::LIMIT.into(), limit.to_string());
        }
        query
    }
}

impl ApiClient {
    /// Fetch the first page of a device's messages.
    pub async fn device_messages(&self, device_id: &str, query: &MessageQuery) -> SfResult<Page> {
        let request = RequestDescriptor::get(format!("devices/{device_id}/messages"))
            .with_params(query.to_params());
        self.execute(request).await
    }

    /// List a device's messages, draining every page when `query.list_all`
    /// is set.
    ///
    /// The endpoint is rate limited; 429 responses while draining are
    /// retried after the configured delay.
    pub async fn list_device_messages(
        &self,
        device_id: &str,
        query: &MessageQuery,
    ) -> SfResult<Vec<Value>> {
        let page = self.device_messages(device_id, query).await?;
        if query.list_all {
            drain_all(page, RateLimitPolicy::device_messages(self.rate_limit())).await
        } else {
            Ok(page.into_items())
        }
    }

    /// Like [`ApiClient::list_device_messages`], decoded into records.
    pub async fn list_device_messages_typed(
        &self,
        device_id: &str,
        query: &MessageQuery,
    ) -> SfResult<Vec<DeviceMessage>> {
        self.list_device_messages(device_id, query)
            .await?
            .iter()
            .map(DeviceMessage::from_server_map)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};

    #[test]
    fn test_time_window_params() {
        let naive = NaiveDate::from_ymd_opt(2021, 2, 22)
            .unwrap()
            .and_hms_opt(8, 58, 41)
            .unwrap();
        let q = MessageQuery::new().since(naive).before(1_613_984_400_000_i64).limit(10);
        let params = q.to_params();
        assert_eq!(params["since"], "1613984321000");
        assert_eq!(params["before"], "1613984400000");
        assert_eq!(params["limit"], "10");
        assert!(!q.list_all);
    }

    #[test]
    fn test_naive_and_aware_agree() {
        let naive = NaiveDate::from_ymd_opt(2021, 2, 22)
            .unwrap()
            .and_hms_opt(8, 58, 41)
            .unwrap();
        let utc = Utc.from_utc_datetime(&naive);
        let plus4 = utc.with_timezone(&FixedOffset::east_opt(4 * 3600).unwrap());

        let a = MessageQuery::new().since(naive).before(naive).to_params();
        let b = MessageQuery::new().since(utc).before(plus4).to_params();
        assert_eq!(a, b);
    }

    #[test]
    fn test_absent_window_is_omitted() {
        let params = MessageQuery::new().all().to_params();
        assert!(params.is_empty());
    }

    #[test]
    fn test_filters_override_extra() {
        let mut q = MessageQuery::new().since(5_i64);
        q.extra.insert("since".into(), "1".into());
        q.extra.insert("fields".into(), "device(name)".into());
        let params = q.to_params();
        assert_eq!(params["since"], "5");
        assert_eq!(params["fields"], "device(name)");
    }
}
