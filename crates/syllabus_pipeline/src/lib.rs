//! Course generation and content assembly for Syllabus.
//!
//! This crate turns a [`CourseBrief`](syllabus_core::CourseBrief) into a
//! stored course in two triggered operations:
//!
//! - **Layout**: one model call produces the chapter skeleton; the banner
//!   image and video link verification then run concurrently.
//! - **Content**: every chapter is expanded independently; a failed chapter
//!   becomes a placeholder instead of failing the course.
//!
//! Model calls go through a [`ModelInvoker`] that retries transient
//! failures. Stage outputs are written through the [`CourseAssembler`],
//! which only touches the fields a stage owns and announces each write on
//! [`CourseEvents`].
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use syllabus_models::GeminiClient;
//! use syllabus_pipeline::{CoursePipeline, InMemoryCourseRepository};
//! use syllabus_rate_limit::SyllabusConfig;
//!
//! # async fn example() -> syllabus_error::SyllabusResult<()> {
//! let config = SyllabusConfig::load()?;
//! let pipeline = CoursePipeline::builder()
//!     .config(&config)
//!     .text_generator(Arc::new(GeminiClient::new(&config.model)?))
//!     .repository(Arc::new(InMemoryCourseRepository::new()))
//!     .build()?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assembly;
mod banner;
mod claim;
mod content;
mod events;
mod extraction;
mod in_memory_repository;
mod invoker;
mod layout;
mod pipeline;
pub mod prompts;
mod video;

pub use assembly::CourseAssembler;
pub use banner::BannerGenerator;
pub use claim::{CLAIMABLE, ContentClaim, release_stale_claim, settled_status};
pub use content::ChapterContentGenerator;
pub use events::{CourseEvent, CourseEventKind, CourseEvents};
pub use extraction::{extract_as, extract_json};
pub use in_memory_repository::InMemoryCourseRepository;
pub use invoker::ModelInvoker;
pub use layout::LayoutGenerator;
pub use pipeline::{CoursePipeline, CoursePipelineBuilder, GenerationReport};
pub use video::{EMBED_BASE, VideoResolver, extract_video_id};
