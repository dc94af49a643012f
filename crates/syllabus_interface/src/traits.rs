//! Capability traits the pipeline is written against.
//!
//! Concrete HTTP adapters live in `syllabus_models`; tests supply mocks.

use crate::{ImageRequest, VideoSearchHit};
use async_trait::async_trait;
use syllabus_error::SyllabusResult;

/// Text generation backend.
///
/// Errors should classify themselves through
/// [`RetryableError`](syllabus_error::RetryableError) so the invoker knows
/// which failures are transient.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a reply to a single prompt.
    async fn generate_text(&self, prompt: &str) -> SyllabusResult<String>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gemini-2.5-flash").
    fn model_name(&self) -> &str;
}

/// Image generation backend.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate an image, returning either a URL or an inline base64 payload.
    async fn generate_image(&self, request: &ImageRequest) -> SyllabusResult<String>;
}

/// Video search backend.
#[async_trait]
pub trait VideoSearch: Send + Sync {
    /// Search for videos matching a free-text query, best match first.
    async fn search(&self, query: &str) -> SyllabusResult<Vec<VideoSearchHit>>;
}

/// Lightweight reachability probe.
#[async_trait]
pub trait VideoProbe: Send + Sync {
    /// Issue a HEAD request and return the status code.
    ///
    /// Timeouts and network failures are errors.
    async fn head_check(&self, url: &str) -> SyllabusResult<u16>;
}
