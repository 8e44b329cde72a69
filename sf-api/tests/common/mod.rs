#![allow(dead_code)]

use mockito::ServerGuard;

use sf_api::ApiClient;
use sf_core::config::{ApiConfig, RateLimitConfig};

pub async fn setup_mock_server() -> (ServerGuard, ApiClient) {
    let server = mockito::Server::new_async().await;
    let client = client_for(&server.url());
    (server, client)
}

pub fn client_for(base_url: &str) -> ApiClient {
    let config = ApiConfig {
        base_url: base_url.to_string(),
        login: "test".into(),
        password: "test".into(),
        timeout_ms: 5_000,
        ..ApiConfig::default()
    };
    ApiClient::new(&config)
        .unwrap()
        .with_rate_limit(RateLimitConfig {
            device_messages_delay_secs: 0,
            max_retries: 0,
        })
}

/// `Authorization` header for test:test.
pub const BASIC_AUTH: &str = "Basic dGVzdDp0ZXN0";
