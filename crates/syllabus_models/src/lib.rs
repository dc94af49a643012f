//! HTTP capability adapters for Syllabus.
//!
//! Each adapter implements one trait from `syllabus_interface` and sits
//! behind its own feature flag:
//!
//! - **Gemini** text generation - `gemini` feature
//! - **AI Guru Lab** banner images - `image` feature
//! - **YouTube** search and embed probe - `youtube` feature
//!
//! API keys come from the environment; endpoints and timeouts from
//! [`SyllabusConfig`](syllabus_rate_limit::SyllabusConfig).
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "gemini")]
//! # {
//! use syllabus_interface::TextGenerator;
//! use syllabus_models::GeminiClient;
//! use syllabus_rate_limit::SyllabusConfig;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SyllabusConfig::load()?;
//! let client = GeminiClient::new(&config.model)?;
//! let text = client.generate_text("Outline a course on Rust").await?;
//! # Ok(())
//! # }
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

#[cfg(feature = "gemini")]
mod gemini;

#[cfg(feature = "image")]
mod image;

#[cfg(feature = "youtube")]
mod youtube;

#[cfg(feature = "gemini")]
pub use gemini::{
    GEMINI_API_KEY_VAR, GeminiCandidate, GeminiClient, GeminiContent, GeminiErrorBody,
    GeminiErrorDetail, GeminiPart, GeminiRequest, GeminiRequestBuilder, GeminiResponse,
    classify_error,
};

#[cfg(feature = "image")]
pub use image::{IMAGE_API_KEY_VAR, ImageGenBody, ImageGenClient, ImageGenReply};

#[cfg(feature = "youtube")]
pub use youtube::{
    HttpVideoProbe, SearchItem, SearchItemId, SearchResponse, Snippet, Thumbnail, Thumbnails,
    YOUTUBE_API_KEY_VAR, YouTubeSearchClient,
};
