//! Device endpoints.

use serde_json::Value;

use sf_core::constants::params;
use sf_core::error::SfResult;
use sf_models::Device;

use crate::client::ApiClient;
use crate::paging::{drain_all, Page, RateLimitPolicy};
use crate::request::{QueryParams, RequestDescriptor};

/// Query parameters for listing devices.
#[derive(Debug, Clone, Default)]
pub struct DeviceQuery {
    /// Follow pagination and return every device.
    pub list_all: bool,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    /// Additional filters passed through as-is (e.g. `deviceTypeId`).
    pub extra: QueryParams,
}

impl DeviceQuery {
    /// A query that retrieves the full collection.
    pub fn all() -> Self {
        Self {
            list_all: true,
            ..Self::default()
        }
    }

    fn to_params(&self) -> QueryParams {
        let mut query = self.extra.clone();
        if let Some(limit) = self.limit {
            query.insert(params::LIMIT.into(), limit.to_string());
        }
        if let Some(offset) = self.offset {
            query.insert(params::OFFSET.into(), offset.to_string());
        }
        query
    }
}

impl ApiClient {
    /// Fetch the first page of devices. Follow `page.next` for more.
    pub async fn devices(&self, query: &DeviceQuery) -> SfResult<Page> {
        self.execute(RequestDescriptor::get("devices").with_params(query.to_params()))
            .await
    }

    /// List devices, draining every page when `query.list_all` is set.
    ///
    /// This endpoint has no documented rate limit, so a 429 is surfaced.
    pub async fn list_devices(&self, query: &DeviceQuery) -> SfResult<Vec<Value>> {
        let page = self.devices(query).await?;
        if query.list_all {
            drain_all(page, RateLimitPolicy::none()).await
        } else {
            Ok(page.into_items())
        }
    }

    /// Like [`ApiClient::list_devices`], decoded into [`Device`] records.
    pub async fn list_devices_typed(&self, query: &DeviceQuery) -> SfResult<Vec<Device>> {
        self.list_devices(query)
            .await?
            .iter()
            .map(Device::from_server_map)
            .collect()
    }

    /// Get a single device, undecoded.
    pub async fn device(&self, device_id: &str) -> SfResult<Value> {
        let page = self
            .execute(RequestDescriptor::get(format!("devices/{device_id}")))
            .await?;
        Ok(page.data)
    }

    /// Get a single device as a [`Device`] record.
    pub async fn device_typed(&self, device_id: &str) -> SfResult<Device> {
        Device::from_server_map(&self.device(device_id).await?)
    }
}
