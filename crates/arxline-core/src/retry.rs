//! Bounded retry with exponential backoff

use std::fmt::Display;
use std::time::Duration;

use crate::error::HttpError;

/// Errors that can tell a transient failure from a permanent one.
pub trait Retryable {
    fn is_retryable(&self) -> bool;
}

impl Retryable for HttpError {
    fn is_retryable(&self) -> bool {
        HttpError::is_retryable(self)
    }
}

/// How many extra attempts a transient failure earns, and how long to wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// One attempt, no retries.
    pub const fn single_attempt() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
        }
    }

    /// Exponential backoff: base * 2^(attempt - 1) (1s, 2s, 4s, ... for a 1s base)
    pub fn backoff_duration(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1)))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::single_attempt()
    }
}

/// Retry a fallible operation with exponential backoff.
///
/// On retryable errors, logs the failure, sleeps, and retries up to
/// `policy.max_retries` times.
///
/// Returns `Ok(T)` on first success, or the final `Err` on exhaustion / non-retryable error.
pub fn retry_with_backoff<T, E>(
    label: &str,
    policy: RetryPolicy,
    mut attempt_fn: impl FnMut() -> Result<T, E>,
) -> Result<T, E>
where
    E: Retryable + Display,
{
    let mut attempt = 0u32;
    loop {
        match attempt_fn() {
            Ok(v) => return Ok(v),
            Err(e) if attempt < policy.max_retries && e.is_retryable() => {
                attempt += 1;
                let delay = policy.backoff_duration(attempt);
                log::warn!(
                    "{label}: attempt {attempt}/{} failed: {e}, retrying in {delay:?}",
                    policy.max_retries + 1
                );
                std::thread::sleep(delay);
            }
            Err(e) => {
                if attempt > 0 {
                    log::error!("{label}: failed permanently after {attempt} retries: {e}");
                }
                return Err(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http_err(status: u16) -> HttpError {
        HttpError::Http {
            status: Some(status),
            message: "test".to_string(),
        }
    }

    fn fast(max_retries: u32) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            base_delay: Duration::ZERO,
        }
    }

    #[test]
    fn backoff_exponential() {
        let policy = RetryPolicy {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
        };
        assert_eq!(policy.backoff_duration(1), Duration::from_secs(1));
        assert_eq!(policy.backoff_duration(2), Duration::from_secs(2));
        assert_eq!(policy.backoff_duration(3), Duration::from_secs(4));
    }

    #[test]
    fn single_attempt_never_retries() {
        let mut calls = 0;
        let result: Result<(), HttpError> =
            retry_with_backoff("test", RetryPolicy::single_attempt(), || {
                calls += 1;
                Err(http_err(503))
            });
        assert!(result.is_err());
        assert_eq!(calls, 1);
    }

    #[test]
    fn transient_then_success() {
        let mut calls = 0;
        let result = retry_with_backoff("test", fast(2), || {
            calls += 1;
            if calls < 3 { Err(http_err(503)) } else { Ok(calls) }
        });
        assert_eq!(result.unwrap(), 3);
    }

    #[test]
    fn permanent_error_not_retried() {
        let mut calls = 0;
        let result: Result<(), HttpError> = retry_with_backoff("test", fast(5), || {
            calls += 1;
            Err(http_err(400))
        });
        assert_eq!(result.unwrap_err().status(), Some(400));
        assert_eq!(calls, 1);
    }

    #[test]
    fn gives_up_after_max_retries() {
        let mut calls = 0;
        let result: Result<(), HttpError> = retry_with_backoff("test", fast(2), || {
            calls += 1;
            Err(http_err(500))
        });
        assert!(result.is_err());
        assert_eq!(calls, 3);
    }
}
