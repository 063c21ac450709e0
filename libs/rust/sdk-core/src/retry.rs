//! Retry policy with exponential backoff for transient transport failures.
//!
//! Retries are off by default; a service handle opts in through
//! `BaseService::enable_retries`.

use crate::CoreError;
use std::time::Duration;
use tracing::warn;

/// Retry policy configuration.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    pub max_retries: u32,
    /// Initial delay between retries
    pub initial_delay: Duration,
    /// Maximum delay between retries
    pub max_delay: Duration,
    /// Multiplier for exponential backoff
    pub multiplier: f64,
    /// Whether to add jitter to delays
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 4,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            multiplier: 2.0,
            jitter: true,
        }
    }
}

impl RetryConfig {
    /// Set the maximum number of retries.
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the initial delay.
    #[must_use]
    pub const fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Set the maximum delay.
    #[must_use]
    pub const fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Disable jitter.
    #[must_use]
    pub const fn without_jitter(mut self) -> Self {
        self.jitter = false;
        self
    }
}

/// Retry policy for resending requests that failed transiently.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    config: RetryConfig,
}

impl RetryPolicy {
    /// Create a new retry policy with the given configuration.
    #[must_use]
    pub const fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    /// Build a policy from the two knobs a service handle exposes.
    ///
    /// Zero values fall back to the defaults.
    #[must_use]
    pub fn from_limits(max_retries: u32, max_interval: Duration) -> Self {
        let defaults = RetryConfig::default();
        let config = RetryConfig {
            max_retries: if max_retries == 0 {
                defaults.max_retries
            } else {
                max_retries
            },
            max_delay: if max_interval.is_zero() {
                defaults.max_delay
            } else {
                max_interval
            },
            ..defaults
        };
        Self::new(config)
    }

    /// Calculate the delay for a given attempt number.
    ///
    /// Uses exponential backoff with optional jitter, capped at the
    /// configured maximum.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        let base_delay =
            self.config.initial_delay.as_millis() as f64 * self.config.multiplier.powi(exponent);

        let max_ms = self.config.max_delay.as_millis() as f64;
        let delay_ms = base_delay.min(max_ms);

        let final_delay = if self.config.jitter {
            // Up to 25% jitter, still bounded by the cap
            let jitter_factor = 1.0 + (rand::random::<f64>() * 0.25);
            (delay_ms * jitter_factor).min(max_ms)
        } else {
            delay_ms
        };

        Duration::from_millis(final_delay as u64)
    }

    /// Delay requested by the server through `Retry-After`, if any.
    fn server_delay(&self, error: &CoreError) -> Option<Duration> {
        let seconds = error
            .response()?
            .header("retry-after")?
            .trim()
            .parse::<u64>()
            .ok()?;
        Some(Duration::from_secs(seconds).min(self.config.max_delay))
    }

    /// Check if an error should be retried.
    #[must_use]
    pub const fn should_retry(&self, error: &CoreError, attempt: u32) -> bool {
        attempt < self.config.max_retries && error.is_retryable()
    }

    /// Execute an async operation with retries.
    ///
    /// # Errors
    ///
    /// Returns the last error if all retries are exhausted or the error is
    /// not retryable.
    pub async fn execute<F, Fut, T>(&self, mut operation: F) -> Result<T, CoreError>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, CoreError>>,
    {
        let mut attempt = 0;
        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(error) => {
                    if !self.should_retry(&error, attempt) {
                        return Err(error);
                    }
                    let delay = self
                        .server_delay(&error)
                        .unwrap_or_else(|| self.delay_for_attempt(attempt));
                    warn!(
                        attempt = attempt + 1,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %error,
                        "Retrying request"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Get the maximum number of retries.
    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.config.max_retries
    }

    /// Get the maximum delay between attempts.
    #[must_use]
    pub const fn max_delay(&self) -> Duration {
        self.config.max_delay
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(RetryConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DetailedResponse;
    use reqwest::header::{HeaderMap, HeaderValue};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy::new(
            RetryConfig::default()
                .with_max_retries(max_retries)
                .with_initial_delay(Duration::from_millis(1))
                .without_jitter(),
        )
    }

    #[test]
    fn test_from_limits_defaults() {
        let policy = RetryPolicy::from_limits(0, Duration::ZERO);
        assert_eq!(policy.max_retries(), 4);
        assert_eq!(policy.max_delay(), Duration::from_secs(30));

        let policy = RetryPolicy::from_limits(2, Duration::from_secs(5));
        assert_eq!(policy.max_retries(), 2);
        assert_eq!(policy.max_delay(), Duration::from_secs(5));
    }

    #[test]
    fn test_delay_calculation_no_jitter() {
        let policy = RetryPolicy::new(RetryConfig::default().without_jitter());

        assert_eq!(policy.delay_for_attempt(0), Duration::from_secs(1));
        assert_eq!(policy.delay_for_attempt(1), Duration::from_secs(2));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_secs(4));
        assert_eq!(policy.delay_for_attempt(10), Duration::from_secs(30));
    }

    #[test]
    fn test_retry_after_header_is_capped() {
        let mut headers = HeaderMap::new();
        headers.insert("retry-after", HeaderValue::from_static("120"));
        let error = CoreError::status(DetailedResponse::new(429, headers, Vec::new()));

        let policy = RetryPolicy::from_limits(1, Duration::from_secs(10));
        assert_eq!(policy.server_delay(&error), Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_should_retry() {
        let policy = fast_policy(3);

        assert!(policy.should_retry(&CoreError::RateLimited, 0));
        assert!(policy.should_retry(&CoreError::RateLimited, 2));
        assert!(!policy.should_retry(&CoreError::RateLimited, 3));
        assert!(!policy.should_retry(&CoreError::invalid_input("id"), 0));
    }

    #[tokio::test]
    async fn test_execute_retries_until_success() {
        let policy = fast_policy(3);
        let calls = Arc::new(AtomicU32::new(0));

        let counter = Arc::clone(&calls);
        let result = policy
            .execute(|| {
                let counter = Arc::clone(&counter);
                async move {
                    if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                        Err(CoreError::unavailable("reset"))
                    } else {
                        Ok(7)
                    }
                }
            })
            .await;

        assert_eq!(result.ok(), Some(7));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_execute_non_retryable_error() {
        let policy = fast_policy(3);
        let calls = AtomicU32::new(0);
        let result: Result<i32, CoreError> = policy
            .execute(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(CoreError::invalid_input("bad")) }
            })
            .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
