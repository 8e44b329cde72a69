//! Cursor-based pagination.
//!
//! `ApiClient::execute` returns a [`Page`]: the payload plus an optional
//! [`Cursor`] for the following page. A cursor is a self-contained
//! continuation (client handle and replayable request), so it can be held,
//! fetched again, or handed to [`Pages`] which walks the remaining pages
//! and absorbs rate limiting according to a [`RateLimitPolicy`].

use std::fmt;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use sf_core::config::RateLimitConfig;
use sf_core::error::SfResult;

use crate::client::ApiClient;
use crate::request::RequestDescriptor;

/// One response worth of payload, plus the way to the next one.
#[derive(Debug)]
pub struct Page {
    pub data: Value,
    pub next: Option<Cursor>,
}

impl Page {
    /// Whether the server announced a further page.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// The payload as a list of items (see [`append_payload`]).
    pub fn into_items(self) -> Vec<Value> {
        let mut items = Vec::new();
        append_payload(&mut items, self.data);
        items
    }
}

/// Continuation for the next page of a request.
#[derive(Clone)]
pub struct Cursor {
    client: ApiClient,
    request: RequestDescriptor,
}

impl Cursor {
    pub(crate) fn new(client: ApiClient, request: RequestDescriptor) -> Self {
        Self { client, request }
    }

    /// The request this cursor replays, with next-page parameters merged in.
    pub fn request(&self) -> &RequestDescriptor {
        &self.request
    }

    /// Fetch the page this cursor points to.
    pub async fn fetch(&self) -> SfResult<Page> {
        self.client.execute(self.request.clone()).await
    }
}

impl fmt::Debug for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("method", &self.request.method)
            .field("route", &self.request.route)
            .field("params", &self.request.params)
            .finish()
    }
}

/// How a page walk reacts to HTTP 429.
///
/// Without a delay, 429 is not recoverable and ends the walk with
/// `TooManyRequests`. With a delay, the same cursor is retried after
/// sleeping, up to `max_retries` consecutive times (unbounded when `None`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateLimitPolicy {
    pub delay: Option<Duration>,
    pub max_retries: Option<u32>,
}

impl RateLimitPolicy {
    /// Surface every 429.
    pub fn none() -> Self {
        Self::default()
    }

    /// Sleep `delay` after each 429 and retry indefinitely.
    pub fn fixed_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            max_retries: None,
        }
    }

    /// Bound the number of consecutive retries for one page.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Policy for the device messages endpoint.
    pub fn device_messages(config: &RateLimitConfig) -> Self {
        Self {
            delay: Some(config.device_messages_delay()),
            max_retries: config.retry_limit(),
        }
    }
}

/// Lazy walk over the pages of one request.
///
/// Yields the first page's payload, then fetches each following page on
/// demand. After an error the failed cursor is kept, so calling
/// [`Pages::next_page`] again retries it.
pub struct Pages {
    first: Option<Value>,
    cursor: Option<Cursor>,
    policy: RateLimitPolicy,
}

impl Pages {
    /// Start from an already fetched page.
    pub fn new(first: Page, policy: RateLimitPolicy) -> Self {
        Self {
            first: Some(first.data),
            cursor: first.next,
            policy,
        }
    }

    /// Start from a cursor, fetching its page on the first call.
    pub fn from_cursor(cursor: Cursor, policy: RateLimitPolicy) -> Self {
        Self {
            first: None,
            cursor: Some(cursor),
            policy,
        }
    }

    /// The cursor of the next page to fetch, if any.
    pub fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    /// True once every page has been yielded.
    pub fn is_exhausted(&self) -> bool {
        self.first.is_none() && self.cursor.is_none()
    }

    /// Next payload, or `None` when the pages are exhausted.
    pub async fn next_page(&mut self) -> Option<SfResult<Value>> {
        if let Some(data) = self.first.take() {
            return Some(Ok(data));
        }
        let cursor = self.cursor.take()?;

        let mut retries = 0u32;
        loop {
            match cursor.fetch().await {
                Ok(page) => {
                    self.cursor = page.next;
                    return Some(Ok(page.data));
                }
                Err(e) if e.is_rate_limited() => {
                    let Some(delay) = self.policy.delay else {
                        self.cursor = Some(cursor);
                        return Some(Err(e));
                    };
                    if self.policy.max_retries.is_some_and(|max| retries >= max) {
                        warn!(
                            "giving up on {} after {} rate-limited retries",
                            cursor.request.route, retries
                        );
                        self.cursor = Some(cursor);
                        return Some(Err(e));
                    }
                    retries += 1;
                    debug!(
                        "too many requests on {}, sleeping for {:.1}s",
                        cursor.request.route,
                        delay.as_secs_f64()
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    self.cursor = Some(cursor);
                    return Some(Err(e));
                }
            }
        }
    }

    /// Drain every remaining page into one list.
    pub async fn collect_all(mut self) -> SfResult<Vec<Value>> {
        let mut items = Vec::new();
        while let Some(page) = self.next_page().await {
            append_payload(&mut items, page?);
        }
        Ok(items)
    }
}

/// Follow `first.next` to exhaustion and concatenate every payload,
/// including the first one.
pub async fn drain_all(first: Page, policy: RateLimitPolicy) -> SfResult<Vec<Value>> {
    Pages::new(first, policy).collect_all().await
}

/// Arrays contribute their elements, `null` nothing, anything else itself.
pub fn append_payload(items: &mut Vec<Value>, payload: Value) {
    match payload {
        Value::Array(values) => items.extend(values),
        Value::Null => {}
        other => items.push(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_append_payload() {
        let mut items = Vec::new();
        append_payload(&mut items, json!([1, 2]));
        append_payload(&mut items, Value::Null);
        append_payload(&mut items, json!({"id": "x"}));
        assert_eq!(items, vec![json!(1), json!(2), json!({"id": "x"})]);
    }

    #[test]
    fn test_policy_constructors() {
        assert_eq!(RateLimitPolicy::none().delay, None);

        let policy = RateLimitPolicy::fixed_delay(Duration::from_secs(1)).with_max_retries(3);
        assert_eq!(policy.delay, Some(Duration::from_secs(1)));
        assert_eq!(policy.max_retries, Some(3));

        let config = RateLimitConfig::default();
        let policy = RateLimitPolicy::device_messages(&config);
        assert_eq!(policy.delay, Some(Duration::from_secs(1)));
        assert_eq!(policy.max_retries, None);
    }

    #[tokio::test]
    async fn test_single_page_drain_needs_no_requests() {
        let page = Page {
            data: json!([1, 2]),
            next: None,
        };
        assert!(!page.has_next());
        let items = drain_all(page, RateLimitPolicy::none()).await.unwrap();
        assert_eq!(items.len(), 2);
    }

    #[tokio::test]
    async fn test_pages_exhaustion() {
        let mut pages = Pages::new(
            Page {
                data: json!(["a"]),
                next: None,
            },
            RateLimitPolicy::none(),
        );
        assert!(!pages.is_exhausted());
        assert_eq!(pages.next_page().await.unwrap().unwrap(), json!(["a"]));
        assert!(pages.is_exhausted());
        assert!(pages.next_page().await.is_none());
    }
}
