//! HTTP plumbing shared by the hosted oracle adapters.
//!
//! Maps reqwest failures and HTTP status codes onto `OracleError` and runs
//! requests with exponential backoff on retryable errors.

use reqwest::{Client, Response};
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::OracleError;

/// Retry-after used when the service does not say.
const DEFAULT_RETRY_AFTER_SECS: u32 = 30;

/// Largest backoff exponent; later retries wait 2^6 seconds.
const MAX_BACKOFF_EXPONENT: u32 = 6;

/// Builds a client with a per-request timeout.
pub(crate) fn build_client(timeout: Duration) -> Result<Client, OracleError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| OracleError::InvalidRequest(format!("Failed to create HTTP client: {}", e)))
}

/// Maps a send failure onto an oracle error.
pub(crate) fn map_send_error(err: reqwest::Error, timeout: Duration) -> OracleError {
    if err.is_timeout() {
        OracleError::timeout(timeout)
    } else if err.is_connect() {
        OracleError::network(format!("Connection failed: {}", err))
    } else {
        OracleError::network(err.to_string())
    }
}

/// Passes successful responses through and maps error statuses.
pub(crate) async fn check_status(response: Response) -> Result<Response, OracleError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_body = response.text().await.unwrap_or_default();

    match status.as_u16() {
        401 | 403 => Err(OracleError::AuthenticationFailed),
        429 => Err(OracleError::rate_limited(parse_retry_after(&error_body))),
        400 | 404 | 422 => Err(OracleError::InvalidRequest(error_body)),
        // Hosted inference answers 503 while a model is loading.
        500..=599 => Err(OracleError::unavailable(format!(
            "Server error {}: {}",
            status, error_body
        ))),
        _ => Err(OracleError::network(format!(
            "Unexpected status {}: {}",
            status, error_body
        ))),
    }
}

/// Parses a "try again in Ns" hint out of an error body.
pub(crate) fn parse_retry_after(error_body: &str) -> u32 {
    if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(error_body) {
        let message = parsed
            .get("error")
            .and_then(|e| e.get("message").or(Some(e)))
            .and_then(|m| m.as_str());
        if let Some(s) = message {
            if let Some(idx) = s.find("try again in ") {
                let rest = &s[idx + 13..];
                let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
                if let Ok(secs) = digits.parse::<u32>() {
                    return secs;
                }
            }
        }
    }
    DEFAULT_RETRY_AFTER_SECS
}

/// Delay before retry number `retry_count + 1`; doubles up to 64 seconds.
fn backoff(retry_count: u32) -> Duration {
    Duration::from_secs(1u64 << retry_count.min(MAX_BACKOFF_EXPONENT))
}

/// Runs `attempt` until it succeeds, fails with a non-retryable error, or
/// `max_retries` retries are spent. Backoff doubles from one second.
pub(crate) async fn with_retries<T, F, Fut>(
    oracle: &str,
    max_retries: u32,
    mut attempt: F,
) -> Result<T, OracleError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, OracleError>>,
{
    let mut retry_count = 0;
    loop {
        match attempt().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !err.is_retryable() || retry_count >= max_retries {
                    return Err(err);
                }
                tracing::warn!(oracle, error = %err, retry = retry_count + 1, "Retrying oracle call");
            }
        }

        sleep(backoff(retry_count)).await;
        retry_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_then_caps() {
        assert_eq!(backoff(0), Duration::from_secs(1));
        assert_eq!(backoff(3), Duration::from_secs(8));
        assert_eq!(backoff(6), Duration::from_secs(64));
        assert_eq!(backoff(64), Duration::from_secs(64));
        assert_eq!(backoff(u32::MAX), Duration::from_secs(64));
    }
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn parse_retry_after_from_message() {
        let error = r#"{"error":{"message":"Rate limit exceeded. Please try again in 12 seconds."}}"#;
        assert_eq!(parse_retry_after(error), 12);
    }

    #[test]
    fn parse_retry_after_from_plain_error_string() {
        let error = r#"{"error":"Rate limit reached, try again in 7s"}"#;
        assert_eq!(parse_retry_after(error), 7);
    }

    #[test]
    fn parse_retry_after_default() {
        assert_eq!(parse_retry_after(r#"{"error":{"message":"nope"}}"#), 30);
        assert_eq!(parse_retry_after("not json"), 30);
    }

    #[tokio::test]
    async fn non_retryable_error_is_returned_immediately() {
        let attempts = AtomicU32::new(0);
        let result: Result<(), _> = with_retries("test", 3, || async {
            attempts.fetch_add(1, Ordering::SeqCst);
            Err(OracleError::AuthenticationFailed)
        })
        .await;

        assert_eq!(result, Err(OracleError::AuthenticationFailed));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn zero_retries_means_single_attempt() {
        let attempts = AtomicU32::new(0);
        let result: Result<(), _> = with_retries("test", 0, || async {
            attempts.fetch_add(1, Ordering::SeqCst);
            Err(OracleError::unavailable("loading"))
        })
        .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }
}
