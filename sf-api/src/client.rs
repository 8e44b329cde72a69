//! HTTP client for the Sigfox v2 REST API.
//!
//! Handles basic authentication, custom headers, timeouts and response
//! classification, and turns `paging.next` links into cursors.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use tracing::debug;

use sf_core::config::{ApiConfig, AppConfig, RateLimitConfig};
use sf_core::constants;
use sf_core::error::{SfError, SfResult};

use crate::paging::{Cursor, Page};
use crate::request::{QueryParams, RequestDescriptor};
use crate::response::Envelope;

/// HTTP client for the Sigfox API.
///
/// Cloning is cheap and clones share the connection pool. The client holds
/// no pagination state: every call returns its own [`Page`].
#[derive(Clone)]
pub struct ApiClient {
    inner: Client,
    /// Base URL every route is appended to, always ending with `/`.
    base_url: Url,
    login: String,
    password: String,
    /// Default request timeout.
    timeout: Duration,
    /// Custom headers from config.
    custom_headers: Vec<(String, String)>,
    /// Rate-limit policy settings for paginated endpoints.
    rate_limit: RateLimitConfig,
}

impl ApiClient {
    /// Create a new ApiClient from API configuration.
    pub fn new(config: &ApiConfig) -> SfResult<Self> {
        let base = AppConfig::sanitize_base_url(&config.base_url);
        let base_url = Url::parse(&base)
            .map_err(|e| SfError::Config(format!("invalid base url {base}: {e}")))?;

        let inner = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(Duration::from_secs(constants::CONNECT_TIMEOUT_SECS))
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(30))
            .user_agent(format!("sigfox-rs/{}", constants::APP_VERSION))
            .build()
            .map_err(|e| SfError::Http(format!("failed to build HTTP client: {e}")))?;

        let mut custom_headers: Vec<(String, String)> = config
            .custom_headers
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        custom_headers.sort();

        Ok(Self {
            inner,
            base_url,
            login: config.login.clone(),
            password: config.password.clone(),
            timeout: config.timeout(),
            custom_headers,
            rate_limit: RateLimitConfig::default(),
        })
    }

    /// Create a client from the full application config, requiring credentials.
    pub fn from_app_config(config: &AppConfig) -> SfResult<Self> {
        config.require_credentials()?;
        Ok(Self::new(&config.api)?.with_rate_limit(config.rate_limit.clone()))
    }

    /// Set the rate-limit configuration.
    pub fn with_rate_limit(mut self, config: RateLimitConfig) -> Self {
        self.rate_limit = config;
        self
    }

    /// Base URL of the API.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The login requests are authenticated with.
    pub fn login(&self) -> &str {
        &self.login
    }

    /// Rate-limit configuration.
    pub fn rate_limit(&self) -> &RateLimitConfig {
        &self.rate_limit
    }

    /// Absolute URL for a route.
    fn url(&self, route: &str) -> String {
        format!("{}{}", self.base_url, route.trim_start_matches('/'))
    }

    /// Build a request: credentials and session headers first, then the
    /// descriptor's own parameters and options.
    fn build_request(&self, url: &str, request: &RequestDescriptor) -> RequestBuilder {
        let options = &request.options;
        let mut builder = self
            .inner
            .request(request.method.clone(), url)
            .basic_auth(&self.login, Some(&self.password))
            .timeout(options.timeout.unwrap_or(self.timeout));

        for (key, value) in self.custom_headers.iter().chain(options.headers.iter()) {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if !request.params.is_empty() {
            builder = builder.query(&request.params);
        }
        if let Some(body) = &options.body {
            builder = builder.json(body);
        }
        builder
    }

    /// Execute one API call.
    ///
    /// Returns the payload (`data` when the body is an envelope, the whole
    /// body otherwise) and, when `paging.next` carries parameters, a cursor
    /// replaying this request with those parameters merged over the
    /// original ones. No retries are attempted here.
    pub async fn execute(&self, mut request: RequestDescriptor) -> SfResult<Page> {
        let url = self.url(&request.route);
        debug!("{} {} {:?}", request.method, request.route, request.params);

        let response = self
            .build_request(&url, &request)
            .send()
            .await
            .map_err(Self::classify_error)?;

        let text = Self::check_status(response).await?;
        let envelope = Envelope::parse(&text)?;

        let next_params = envelope.next_params(&self.base_url);
        let next = if next_params.is_empty() {
            None
        } else {
            request.merge_params(next_params);
            Some(Cursor::new(self.clone(), request))
        };

        Ok(Page {
            data: envelope.into_payload(),
            next,
        })
    }

    /// Convenience: GET a route with query parameters.
    pub async fn get(&self, route: &str, params: QueryParams) -> SfResult<Page> {
        self.execute(RequestDescriptor::get(route).with_params(params))
            .await
    }

    /// Check the HTTP status and read the body text.
    async fn check_status(response: Response) -> SfResult<String> {
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(SfError::TooManyRequests);
        }

        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(SfError::BadStatus {
                status: status.as_u16(),
                body,
            });
        }

        response.text().await.map_err(Self::classify_error)
    }

    /// Classify a reqwest error into an SfError variant.
    fn classify_error(e: reqwest::Error) -> SfError {
        if e.is_timeout() {
            SfError::Timeout(e.to_string())
        } else if e.is_connect() {
            SfError::Connection(e.to_string())
        } else {
            SfError::Http(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> ApiConfig {
        ApiConfig {
            base_url: "https://api.sigfox.com/v2".into(),
            login: "user".into(),
            password: "secret".into(),
            ..ApiConfig::default()
        }
    }

    #[test]
    fn test_url_building() {
        let client = ApiClient::new(&test_config()).unwrap();
        assert_eq!(client.url("devices"), "https://api.sigfox.com/v2/devices");
        assert_eq!(
            client.url("/devices/abc/messages"),
            "https://api.sigfox.com/v2/devices/abc/messages"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let config = ApiConfig {
            base_url: "http://exa mple.com".into(),
            ..test_config()
        };
        assert!(matches!(ApiClient::new(&config), Err(SfError::Config(_))));
    }

    #[test]
    fn test_from_app_config_requires_credentials() {
        let config = AppConfig::default();
        assert!(matches!(
            ApiClient::from_app_config(&config),
            Err(SfError::MissingConfig(_))
        ));

        let mut config = AppConfig::default();
        config.api = test_config();
        config.rate_limit.device_messages_delay_secs = 3;
        let client = ApiClient::from_app_config(&config).unwrap();
        assert_eq!(client.login(), "user");
        assert_eq!(client.rate_limit().device_messages_delay_secs, 3);
    }

    #[test]
    fn test_request_carries_auth_and_params() {
        let mut config = test_config();
        config
            .custom_headers
            .insert("x-tenant".into(), "acme".into());
        let client = ApiClient::new(&config).unwrap();

        let descriptor = RequestDescriptor::get("devices").with_param("limit", 10);
        let request = client
            .build_request(&client.url(&descriptor.route), &descriptor)
            .build()
            .unwrap();

        assert_eq!(request.url().query(), Some("limit=10"));
        assert!(request
            .headers()
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("Basic ")));
        assert_eq!(request.headers()["x-tenant"], "acme");
        assert_eq!(request.timeout(), Some(&Duration::from_millis(30_000)));
    }
}
