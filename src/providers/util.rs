use anyhow::{Error, Result};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, error};

/// Sends a request, retrying connection failures and timeouts.
///
/// `retries` counts the extra attempts after the first one; `delay_ms` is the
/// pause between them. Any other error is returned straight away.
pub async fn with_retry<F, Fut, T>(mut send: F, retries: usize, delay_ms: u64) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, reqwest::Error>>,
{
    let mut attempt = 0;
    loop {
        match send().await {
            Ok(val) => return Ok(val),
            Err(err) if attempt < retries && (err.is_connect() || err.is_timeout()) => {
                attempt += 1;
                debug!("Attempt {attempt}/{retries} failed: {err}. Retrying...");
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
            Err(err) => return Err(Error::from(err)),
        }
    }
}

/// Awaits a market data fetch, degrading any failure to an empty list.
///
/// The error is logged under `label`. An empty result means the data is
/// unavailable, not that it is zero.
pub async fn fetch_or_empty<T, Fut>(label: &str, fetch: Fut) -> Vec<T>
where
    Fut: Future<Output = Result<Vec<T>>>,
{
    match fetch.await {
        Ok(items) => {
            debug!("Fetched {} {}", items.len(), label);
            items
        }
        Err(e) => {
            error!(error = %e, "Failed to fetch {label}");
            Vec::new()
        }
    }
}
