//! Rate limiter using governor and Tokio Semaphore.
//!
//! - Governor (GCRA) enforces requests per minute
//! - A Tokio Semaphore bounds in-flight requests

use crate::ModelConfig;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as GovernorRateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use syllabus_error::{GenerationError, GenerationErrorKind, SyllabusResult};
use tokio::sync::Semaphore;

type DirectRateLimiter = GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Throttles calls to an external model.
///
/// Cloning shares the underlying quota, so every chapter task of one
/// pipeline draws from the same budget.
///
/// # Example
///
/// ```
/// use syllabus_rate_limit::RateLimiter;
///
/// # async fn run() -> syllabus_error::SyllabusResult<()> {
/// let limiter = RateLimiter::new(Some(60), Some(2));
/// let _guard = limiter.acquire().await?;
/// // make the call while holding the guard
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct RateLimiter {
    rpm_limiter: Option<Arc<DirectRateLimiter>>,
    concurrent_semaphore: Arc<Semaphore>,
}

impl RateLimiter {
    /// Create a limiter. `None` (or zero) disables that limit.
    pub fn new(rpm: Option<u32>, max_concurrent: Option<u32>) -> Self {
        let rpm_limiter = rpm.and_then(NonZeroU32::new).map(|n| {
            let quota = Quota::per_minute(n);
            Arc::new(GovernorRateLimiter::direct(quota))
        });

        let max_concurrent = max_concurrent
            .filter(|n| *n > 0)
            .map_or(Semaphore::MAX_PERMITS, |n| n as usize);

        Self {
            rpm_limiter,
            concurrent_semaphore: Arc::new(Semaphore::new(max_concurrent)),
        }
    }

    /// Limiter configured from the `[model]` section.
    pub fn from_model_config(config: &ModelConfig) -> Self {
        Self::new(config.rpm, config.max_concurrent)
    }

    /// Wait until the request may proceed.
    ///
    /// Returns a guard that releases the concurrent slot when dropped.
    ///
    /// # Errors
    ///
    /// Fails only if the limiter has been shut down.
    pub async fn acquire(&self) -> SyllabusResult<RateLimiterGuard> {
        if let Some(limiter) = &self.rpm_limiter {
            limiter.until_ready().await;
        }

        // Last, to avoid holding a slot while waiting on quota
        let permit = self
            .concurrent_semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| {
                GenerationError::new(GenerationErrorKind::GenerationFailed(
                    "rate limiter closed".to_string(),
                ))
            })?;

        Ok(RateLimiterGuard { _permit: permit })
    }

    /// Try to acquire without waiting.
    ///
    /// Returns `None` if any limit would block.
    pub fn try_acquire(&self) -> Option<RateLimiterGuard> {
        if let Some(limiter) = &self.rpm_limiter {
            limiter.check().ok()?;
        }
        let permit = self.concurrent_semaphore.clone().try_acquire_owned().ok()?;
        Some(RateLimiterGuard { _permit: permit })
    }

    /// Free concurrent slots right now.
    pub fn available_slots(&self) -> usize {
        self.concurrent_semaphore.available_permits()
    }
}

/// RAII guard for [`RateLimiter`].
///
/// Releases the concurrent slot when dropped, even if the call fails.
#[derive(Debug)]
pub struct RateLimiterGuard {
    _permit: tokio::sync::OwnedSemaphorePermit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn concurrency_slot_is_released_on_drop() {
        let limiter = RateLimiter::new(None, Some(1));
        let guard = limiter.acquire().await.unwrap();
        assert!(limiter.try_acquire().is_none());
        drop(guard);
        assert!(limiter.try_acquire().is_some());
    }

    #[test]
    fn rpm_quota_blocks_after_burst() {
        let limiter = RateLimiter::new(Some(1), None);
        assert!(limiter.try_acquire().is_some());
        assert!(limiter.try_acquire().is_none());
    }
}
