//! Replayable request descriptions.
//!
//! A `RequestDescriptor` captures everything needed to issue a call again
//! with different pagination parameters, which is what lets a cursor be
//! fetched more than once.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::Method;

/// Query string parameters, kept ordered so replays are deterministic.
pub type QueryParams = BTreeMap<String, String>;

/// Per-request transport options, passed through verbatim.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Headers added after the session-wide custom headers.
    pub headers: Vec<(String, String)>,
    /// Optional JSON body.
    pub body: Option<serde_json::Value>,
    /// Overrides the session timeout for this request.
    pub timeout: Option<Duration>,
}

/// Method, route, parameters and options of one API call.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: Method,
    /// Path relative to the API base URL, e.g. `devices/abc/messages`.
    pub route: String,
    pub params: QueryParams,
    pub options: RequestOptions,
}

impl RequestDescriptor {
    pub fn new(method: Method, route: impl Into<String>) -> Self {
        Self {
            method,
            route: route.into(),
            params: QueryParams::new(),
            options: RequestOptions::default(),
        }
    }

    /// Shorthand for a GET descriptor.
    pub fn get(route: impl Into<String>) -> Self {
        Self::new(Method::GET, route)
    }

    /// Replace all query parameters.
    pub fn with_params(mut self, params: QueryParams) -> Self {
        self.params = params;
        self
    }

    /// Set a single query parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(key.into(), value.to_string());
        self
    }

    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    /// Merge `next` over the current parameters. Values from `next` win.
    pub fn merge_params(&mut self, next: QueryParams) {
        self.params.extend(next);
    }
}
