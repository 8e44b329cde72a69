//! CLI command implementations.

pub mod config;
pub mod devices;
pub mod messages;
pub mod request;

use sf_api::ApiClient;
use sf_core::config::ConfigHandle;
use sf_core::error::SfResult;

/// Helper to create an API client from config.
pub async fn create_api_client(config: &ConfigHandle) -> SfResult<ApiClient> {
    let cfg = config.read().await;
    ApiClient::from_app_config(&cfg)
}

/// Print a JSON value, pretty.
pub fn print_json(value: &serde_json::Value) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

/// Format optional epoch milliseconds as a UTC timestamp.
pub fn format_millis(ms: Option<i64>) -> String {
    sf_core::codec::from_ms_timestamp(ms)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Truncate a string to a maximum length, appending an ellipsis if truncated.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{head}...")
    } else {
        s.chars().take(max_len).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer device name", 10), "a longe...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }

    #[test]
    fn test_format_millis() {
        assert_eq!(format_millis(Some(1_613_984_321_000)), "2021-02-22 08:58:41");
        assert_eq!(format_millis(None), "-");
    }
}
