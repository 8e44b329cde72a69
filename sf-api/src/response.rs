//! Response envelope handling.
//!
//! Paginated endpoints answer with
//! ```json
//! { "data": [ ... ], "paging": { "next": "https://api.sigfox.com/v2/devices?offset=100" } }
//! ```
//! Other endpoints return the bare object. The envelope separates the
//! payload from the continuation parameters.

use reqwest::Url;
use serde_json::Value;

use sf_core::error::{SfError, SfResult};

use crate::request::QueryParams;

/// A decoded response body.
#[derive(Debug, Clone)]
pub struct Envelope {
    body: Value,
}

impl Envelope {
    /// Decode a response body. Invalid JSON keeps the raw text in the error.
    pub fn parse(text: &str) -> SfResult<Self> {
        serde_json::from_str(text)
            .map(|body| Self { body })
            .map_err(|e| SfError::Response {
                message: format!("cannot deserialize json: {e}"),
                body: text.to_string(),
            })
    }

    /// The `paging.next` URL, if present.
    pub fn next_url(&self) -> Option<&str> {
        self.body
            .get("paging")
            .and_then(|p| p.get("next"))
            .and_then(|n| n.as_str())
    }

    /// Query parameters of the next page. Empty when there is no next page.
    ///
    /// Relative URLs are resolved against `base`. Parameters with empty
    /// values are dropped.
    pub fn next_params(&self, base: &Url) -> QueryParams {
        self.next_url()
            .map(|next| parse_query(next, base))
            .unwrap_or_default()
    }

    /// The payload: the `data` field when present, the whole body otherwise.
    pub fn into_payload(self) -> Value {
        match self.body {
            Value::Object(mut map) if map.contains_key("data") => {
                map.remove("data").unwrap_or(Value::Null)
            }
            other => other,
        }
    }
}

fn parse_query(next: &str, base: &Url) -> QueryParams {
    let url = match Url::parse(next).or_else(|_| base.join(next)) {
        Ok(url) => url,
        Err(_) => return QueryParams::new(),
    };
    url.query_pairs()
        .filter(|(_, v)| !v.is_empty())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}
