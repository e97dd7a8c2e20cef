//! Retry with exponential back-off and jitter for upstream FIPE calls.
//!
//! The public FIPE mirror is rate limited and flaky under load, so transient
//! failures (timeouts, refused connections, 5xx, 429) are retried a few times
//! before the error reaches the caller. A 429 waits for the mirror's
//! `Retry-After` when it sends one.

use std::future::Future;
use std::time::Duration;

use reqwest::header::{HeaderMap, RETRY_AFTER};

use crate::error::FipeError;

const MAX_DELAY_MS: u64 = 30_000;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// Network-level failures, HTTP 5xx and throttling qualify. Any other 4xx,
/// a bad base URL, or a malformed body will fail the same way again.
pub(crate) fn is_retriable(err: &FipeError) -> bool {
    match err {
        FipeError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        FipeError::Throttled { .. } => true,
        FipeError::InvalidBaseUrl { .. } | FipeError::Deserialize { .. } => false,
    }
}

/// Reads a `Retry-After` header given in seconds. HTTP-date values are ignored.
pub(crate) fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

/// The server's requested wait for a throttled call, capped like any other
/// delay; the computed back-off otherwise.
fn retry_delay(err: &FipeError, backoff_base_ms: u64, attempt: u32) -> Duration {
    match err {
        FipeError::Throttled {
            retry_after: Some(wait),
        } => (*wait).min(Duration::from_millis(MAX_DELAY_MS)),
        _ => backoff_delay(backoff_base_ms, attempt),
    }
}

/// Delay before retry number `attempt` (1-based): `base * 2^(attempt-1)`,
/// capped, then scaled by a random factor in `[0.75, 1.25)`.
fn backoff_delay(backoff_base_ms: u64, attempt: u32) -> Duration {
    let computed = backoff_base_ms.saturating_mul(1u64 << attempt.saturating_sub(1).min(10));
    let capped = computed.min(MAX_DELAY_MS);
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let jittered = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
    Duration::from_millis(jittered)
}

/// Runs `operation` with up to `max_retries` additional attempts on transient errors.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, FipeError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FipeError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let delay = retry_delay(&err, backoff_base_ms, attempt);
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %err,
                    "FIPE transient error, retrying after back-off"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use super::*;

    fn deserialize_err() -> FipeError {
        let src = serde_json::from_str::<()>("invalid").unwrap_err();
        FipeError::Deserialize {
            context: "test".to_owned(),
            source: src,
        }
    }

    async fn connect_err() -> FipeError {
        let err = reqwest::Client::new()
            .get("http://0.0.0.0:1")
            .send()
            .await
            .unwrap_err();
        FipeError::Http(err)
    }

    #[test]
    fn deserialize_error_is_not_retriable() {
        assert!(!is_retriable(&deserialize_err()));
    }

    #[test]
    fn invalid_base_url_is_not_retriable() {
        assert!(!is_retriable(&FipeError::InvalidBaseUrl {
            url: "nope".to_owned(),
            reason: "relative URL without a base".to_owned(),
        }));
    }

    #[test]
    fn throttling_is_retriable() {
        assert!(is_retriable(&FipeError::Throttled { retry_after: None }));
    }

    #[test]
    fn retry_after_reads_seconds_only() {
        let mut headers = HeaderMap::new();
        assert_eq!(retry_after(&headers), None);

        headers.insert(RETRY_AFTER, "7".parse().expect("header value"));
        assert_eq!(retry_after(&headers), Some(Duration::from_secs(7)));

        headers.insert(
            RETRY_AFTER,
            "Wed, 21 Oct 2026 07:28:00 GMT".parse().expect("header value"),
        );
        assert_eq!(retry_after(&headers), None);
    }

    #[test]
    fn throttled_delay_follows_server_and_is_capped() {
        let asked = FipeError::Throttled {
            retry_after: Some(Duration::from_secs(2)),
        };
        assert_eq!(retry_delay(&asked, 1_000, 1), Duration::from_secs(2));

        let greedy = FipeError::Throttled {
            retry_after: Some(Duration::from_secs(3_600)),
        };
        assert_eq!(
            retry_delay(&greedy, 1_000, 1),
            Duration::from_millis(MAX_DELAY_MS)
        );

        let silent = FipeError::Throttled { retry_after: None };
        assert!(retry_delay(&silent, 1_000, 1) < Duration::from_millis(1_250));
    }

    #[test]
    fn delay_is_capped() {
        let delay = backoff_delay(10_000, 10);
        assert!(delay <= Duration::from_millis(MAX_DELAY_MS * 5 / 4));
    }

    #[test]
    fn delay_doubles_per_attempt_within_jitter() {
        let first = backoff_delay(1_000, 1);
        let third = backoff_delay(1_000, 3);
        assert!(first >= Duration::from_millis(750) && first < Duration::from_millis(1_250));
        assert!(third >= Duration::from_millis(3_000) && third < Duration::from_millis(5_000));
    }

    #[tokio::test]
    async fn succeeds_immediately_on_first_try() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, FipeError>(42)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn does_not_retry_malformed_body() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(deserialize_err())
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(FipeError::Deserialize { .. })));
    }

    #[tokio::test]
    async fn retries_then_succeeds() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                let attempt = c.fetch_add(1, Ordering::SeqCst) + 1;
                if attempt < 3 {
                    Err::<u32, _>(connect_err().await)
                } else {
                    Ok(99)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 99);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_retries() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(2, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(connect_err().await)
            }
        })
        .await;
        assert!(matches!(result, Err(FipeError::Http(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 3, "one try plus two retries");
    }
}
