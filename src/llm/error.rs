//! Error types and retry configuration for LLM API calls.

use std::time::Duration;

use thiserror::Error;

/// Classification of an LLM API failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmErrorKind {
    /// 429 - too many requests
    RateLimited,
    /// 5xx - upstream failure
    ServerError,
    /// 4xx other than 429 - bad request, auth, etc.
    ClientError,
    /// Connection, DNS, or timeout failure
    NetworkError,
    /// Response body could not be interpreted
    ParseError,
}

impl std::fmt::Display for LlmErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LlmErrorKind::RateLimited => "rate_limited",
            LlmErrorKind::ServerError => "server_error",
            LlmErrorKind::ClientError => "client_error",
            LlmErrorKind::NetworkError => "network_error",
            LlmErrorKind::ParseError => "parse_error",
        };
        f.write_str(s)
    }
}

/// Map an HTTP status code to an error kind.
pub fn classify_http_status(status: u16) -> LlmErrorKind {
    match status {
        429 => LlmErrorKind::RateLimited,
        500..=599 => LlmErrorKind::ServerError,
        400..=499 => LlmErrorKind::ClientError,
        _ => LlmErrorKind::ServerError,
    }
}

/// An error from an LLM API call.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct LlmError {
    pub kind: LlmErrorKind,
    pub message: String,
    /// HTTP status code, when the failure came from a response
    pub status: Option<u16>,
    /// Server-suggested delay from a Retry-After header
    pub retry_after: Option<Duration>,
}

impl LlmError {
    pub fn rate_limited(message: String, retry_after: Option<Duration>) -> Self {
        Self {
            kind: LlmErrorKind::RateLimited,
            message,
            status: Some(429),
            retry_after,
        }
    }

    pub fn server_error(status: u16, message: String) -> Self {
        Self {
            kind: LlmErrorKind::ServerError,
            message,
            status: Some(status),
            retry_after: None,
        }
    }

    pub fn client_error(status: u16, message: String) -> Self {
        Self {
            kind: LlmErrorKind::ClientError,
            message,
            status: Some(status),
            retry_after: None,
        }
    }

    pub fn network_error(message: String) -> Self {
        Self {
            kind: LlmErrorKind::NetworkError,
            message,
            status: None,
            retry_after: None,
        }
    }

    pub fn parse_error(message: String) -> Self {
        Self {
            kind: LlmErrorKind::ParseError,
            message,
            status: None,
            retry_after: None,
        }
    }
}

/// Retry policy for transient API errors.
///
/// The delay before retry `n` (zero-based) is
/// `initial_delay * exp_base^n`, unless the server sent a longer
/// Retry-After.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total request attempts (1 = no retries)
    pub attempts: u32,
    /// Exponential backoff base
    pub exp_base: f64,
    /// Delay before the first retry
    pub initial_delay: Duration,
    /// HTTP status codes worth retrying
    pub retry_statuses: Vec<u16>,
    /// Upper bound on time spent across all attempts
    pub max_retry_duration: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            attempts: 5,
            exp_base: 7.0,
            initial_delay: Duration::from_secs(1),
            retry_statuses: vec![429, 500, 503, 504],
            max_retry_duration: Duration::from_secs(600),
        }
    }
}

impl RetryConfig {
    /// Whether this error is worth retrying under this policy.
    ///
    /// Network errors are always retryable; response errors only when their
    /// status code is in the configured set.
    pub fn should_retry(&self, error: &LlmError) -> bool {
        match error.kind {
            LlmErrorKind::NetworkError => true,
            LlmErrorKind::ParseError => false,
            _ => error
                .status
                .map(|s| self.retry_statuses.contains(&s))
                .unwrap_or(false),
        }
    }

    /// Backoff delay before retry `attempt` (zero-based).
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let factor = self.exp_base.powi(attempt as i32);
        self.initial_delay.mul_f64(factor)
    }

    /// Delay to apply for `error` before retry `attempt`, honoring a longer
    /// server-suggested Retry-After.
    pub fn suggested_delay(&self, error: &LlmError, attempt: u32) -> Duration {
        let backoff = self.backoff_delay(attempt);
        match error.retry_after {
            Some(after) if after > backoff => after,
            _ => backoff,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_http_status() {
        assert_eq!(classify_http_status(429), LlmErrorKind::RateLimited);
        assert_eq!(classify_http_status(500), LlmErrorKind::ServerError);
        assert_eq!(classify_http_status(503), LlmErrorKind::ServerError);
        assert_eq!(classify_http_status(400), LlmErrorKind::ClientError);
        assert_eq!(classify_http_status(401), LlmErrorKind::ClientError);
    }

    #[test]
    fn test_should_retry_respects_status_set() {
        let config = RetryConfig::default();

        assert!(config.should_retry(&LlmError::rate_limited("slow down".into(), None)));
        assert!(config.should_retry(&LlmError::server_error(503, "unavailable".into())));
        assert!(config.should_retry(&LlmError::server_error(504, "timeout".into())));
        assert!(config.should_retry(&LlmError::network_error("refused".into())));

        // 502 is not in the configured set
        assert!(!config.should_retry(&LlmError::server_error(502, "bad gateway".into())));
        assert!(!config.should_retry(&LlmError::client_error(400, "bad request".into())));
        assert!(!config.should_retry(&LlmError::parse_error("garbage".into())));
    }

    #[test]
    fn test_backoff_delay_grows_exponentially() {
        let config = RetryConfig {
            exp_base: 7.0,
            initial_delay: Duration::from_secs(1),
            ..RetryConfig::default()
        };

        assert_eq!(config.backoff_delay(0), Duration::from_secs(1));
        assert_eq!(config.backoff_delay(1), Duration::from_secs(7));
        assert_eq!(config.backoff_delay(2), Duration::from_secs(49));
    }

    #[test]
    fn test_suggested_delay_honors_longer_retry_after() {
        let config = RetryConfig::default();
        let err = LlmError::rate_limited("slow down".into(), Some(Duration::from_secs(30)));

        // attempt 0 backoff is 1s, Retry-After wins
        assert_eq!(config.suggested_delay(&err, 0), Duration::from_secs(30));
        // attempt 2 backoff is 49s, backoff wins
        assert_eq!(config.suggested_delay(&err, 2), Duration::from_secs(49));
    }
}
