//! Bounded retry with exponential backoff for outbound API calls.
use std::time::Duration;

use reqwest::{header::HeaderMap, StatusCode};

pub const DEFAULT_MAX_RETRIES: u32 = 4;
pub const DEFAULT_MIN_WAIT: Duration = Duration::from_secs(1);
pub const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(30);

/// Retry bounds applied to every API request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    pub min_wait: Duration,
    pub max_wait: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            min_wait: DEFAULT_MIN_WAIT,
            max_wait: DEFAULT_MAX_WAIT,
        }
    }
}

impl RetryPolicy {
    /// `min_wait * 2^attempt`, capped at `max_wait`. `attempt` is zero-based.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.min_wait
            .checked_mul(factor)
            .unwrap_or(self.max_wait)
            .min(self.max_wait)
    }

    /// Wait before retry `attempt`, preferring a server-provided `Retry-After`.
    pub fn wait_for(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        match retry_after {
            Some(wait) => wait.min(self.max_wait),
            None => self.backoff(attempt),
        }
    }

    pub fn allows_retry(&self, attempt: u32) -> bool {
        attempt < self.max_retries
    }
}

/// 429 and 5xx responses are retried, except 501.
pub fn is_retryable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS
        || (status.is_server_error() && status != StatusCode::NOT_IMPLEMENTED)
}

/// Connection, timeout and send failures are retried; malformed requests are not.
pub fn is_retryable_transport(err: &reqwest::Error) -> bool {
    !err.is_builder() && (err.is_connect() || err.is_timeout() || err.is_request())
}

/// Numeric `Retry-After` for 429/503 responses.
pub fn retry_after(status: StatusCode, headers: &HeaderMap) -> Option<Duration> {
    if status != StatusCode::TOO_MANY_REQUESTS && status != StatusCode::SERVICE_UNAVAILABLE {
        return None;
    }
    headers
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}
