//! Flat-delay retry for transient capability failures.

use crate::RetryConfig;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use syllabus_error::{GenerationError, GenerationErrorKind, RetryableError, SyllabusResult};
use tokio_retry2::strategy::FixedInterval;
use tokio_retry2::{Retry, RetryError};
use tracing::{debug, warn};

/// How many times to try and how long to wait in between.
///
/// `max_retries` counts total attempts. The delay is the same before every
/// retry; waiting is an async sleep, so sibling tasks keep running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: usize,
    base_delay: Duration,
}

impl RetryPolicy {
    /// Create a policy. A zero attempt count is raised to one.
    pub fn new(max_retries: usize, base_delay: Duration) -> Self {
        Self {
            max_retries: max_retries.max(1),
            base_delay,
        }
    }

    /// Total attempts.
    pub fn max_retries(&self) -> usize {
        self.max_retries
    }

    /// Delay before each retry.
    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    /// Run `operation` until it succeeds, fails permanently, or attempts run out.
    ///
    /// Errors for which [`RetryableError::is_retryable`] is false are
    /// returned immediately without sleeping. When every attempt fails
    /// transiently the result is `RetriesExhausted` carrying the attempt
    /// count and the last error message.
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    /// use syllabus_rate_limit::RetryPolicy;
    ///
    /// # async fn run() -> syllabus_error::SyllabusResult<()> {
    /// let policy = RetryPolicy::new(3, Duration::from_millis(10));
    /// let text = policy.run(|| async { Ok::<_, syllabus_error::SyllabusError>("hi".to_string()) }).await?;
    /// assert_eq!(text, "hi");
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run<F, Fut, T>(&self, operation: F) -> SyllabusResult<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = SyllabusResult<T>>,
    {
        let attempts = AtomicUsize::new(0);
        let strategy = FixedInterval::new(self.base_delay).take(self.max_retries - 1);
        let max_retries = self.max_retries;

        let attempts_ref = &attempts;
        let operation_ref = &operation;
        let result = Retry::spawn(strategy, move || {
            let attempt = attempts_ref.fetch_add(1, Ordering::SeqCst) + 1;
            let call = operation_ref();
            async move {
                match call.await {
                    Ok(value) => Ok(value),
                    Err(e) if e.is_retryable() => {
                        warn!(attempt, max_retries, error = %e, "Transient failure, will retry");
                        Err(RetryError::Transient {
                            err: e,
                            retry_after: None,
                        })
                    }
                    Err(e) => {
                        debug!(attempt, error = %e, "Permanent failure, not retrying");
                        Err(RetryError::Permanent(e))
                    }
                }
            }
        })
        .await;

        match result {
            Ok(value) => Ok(value),
            Err(e) if e.is_retryable() => {
                let attempts = attempts.load(Ordering::SeqCst);
                warn!(attempts, error = %e, "Retries exhausted");
                Err(GenerationError::new(GenerationErrorKind::RetriesExhausted {
                    attempts,
                    last_error: e.to_string(),
                })
                .into())
            }
            Err(e) => Err(e),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(RetryConfig::default())
    }
}

impl From<RetryConfig> for RetryPolicy {
    fn from(config: RetryConfig) -> Self {
        Self::new(config.max_retries, Duration::from_millis(config.base_delay_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_follows_config() {
        let policy = RetryPolicy::from(RetryConfig {
            max_retries: 5,
            base_delay_ms: 250,
        });
        assert_eq!(policy.max_retries(), 5);
        assert_eq!(policy.base_delay(), Duration::from_millis(250));
    }

    #[test]
    fn zero_attempts_means_one() {
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).max_retries(), 1);
    }
}
