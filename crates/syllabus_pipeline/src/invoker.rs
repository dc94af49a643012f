//! Retrying, rate-limited access to the text model.

use std::sync::Arc;
use syllabus_error::SyllabusResult;
use syllabus_interface::TextGenerator;
use syllabus_rate_limit::{RateLimiter, RetryPolicy};
use tracing::{debug, instrument};

/// Wraps a [`TextGenerator`] with the retry policy and optional throttling.
///
/// Cheap to clone; clones share the generator and the limiter's quota.
#[derive(Clone)]
pub struct ModelInvoker {
    generator: Arc<dyn TextGenerator>,
    policy: RetryPolicy,
    limiter: Option<RateLimiter>,
}

impl ModelInvoker {
    /// Invoker with the given policy and no rate limiting.
    pub fn new(generator: Arc<dyn TextGenerator>, policy: RetryPolicy) -> Self {
        Self {
            generator,
            policy,
            limiter: None,
        }
    }

    /// Throttle every attempt through `limiter`.
    pub fn with_limiter(mut self, limiter: RateLimiter) -> Self {
        self.limiter = Some(limiter);
        self
    }

    /// The retry policy in force.
    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Send one prompt, retrying transient failures.
    ///
    /// # Errors
    ///
    /// Non-transient capability errors are returned as-is after the first
    /// attempt; exhausted retries surface as `RetriesExhausted`.
    #[instrument(skip(self, prompt), fields(model = self.generator.model_name(), prompt_len = prompt.len()))]
    pub async fn invoke(&self, prompt: &str) -> SyllabusResult<String> {
        let this = self;
        let text = self
            .policy
            .run(move || async move {
                let _guard = match &this.limiter {
                    Some(limiter) => Some(limiter.acquire().await?),
                    None => None,
                };
                this.generator.generate_text(prompt).await
            })
            .await?;
        debug!(reply_len = text.len(), "Model replied");
        Ok(text)
    }
}

impl std::fmt::Debug for ModelInvoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelInvoker")
            .field("provider", &self.generator.provider_name())
            .field("model", &self.generator.model_name())
            .field("policy", &self.policy)
            .field("limited", &self.limiter.is_some())
            .finish()
    }
}
