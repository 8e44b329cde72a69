//! Raw request command.

use std::time::Duration;

use sf_api::{Pages, QueryParams, RateLimitPolicy};
use sf_core::config::{ConfigHandle, RateLimitConfig};
use sf_core::error::{SfError, SfResult};

use crate::OutputFormat;

/// Parse `key=value` pairs into query parameters.
fn parse_params(pairs: &[String]) -> SfResult<QueryParams> {
    pairs
        .iter()
        .map(|pair| {
            pair.split_once('=')
                .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
                .filter(|(k, _)| !k.is_empty())
                .ok_or_else(|| SfError::Config(format!("expected key=value, got {pair}")))
        })
        .collect()
}

/// 429 handling for a raw drain. Without an explicit delay, rate limiting
/// ends the walk.
fn drain_policy(delay_secs: Option<u64>, config: &RateLimitConfig) -> RateLimitPolicy {
    match delay_secs {
        Some(secs) => RateLimitPolicy {
            delay: Some(Duration::from_secs(secs)),
            max_retries: config.retry_limit(),
        },
        None => RateLimitPolicy::none(),
    }
}

pub async fn run(
    config: ConfigHandle,
    route: String,
    params: Vec<String>,
    all: bool,
    rate_limit_delay: Option<u64>,
    format: OutputFormat,
) -> SfResult<()> {
    let api = super::create_api_client(&config).await?;
    let params = parse_params(&params)?;
    let first = api.get(&route, params).await?;

    if !all {
        if first.has_next() && matches!(format, OutputFormat::Text) {
            eprintln!("(more pages available, pass --all to follow them)");
        }
        super::print_json(&first.data);
        return Ok(());
    }

    let policy = {
        let cfg = config.read().await;
        drain_policy(rate_limit_delay, &cfg.rate_limit)
    };
    let items = Pages::new(first, policy).collect_all().await?;
    super::print_json(&serde_json::Value::Array(items));
    Ok(())
}
