//! Syllabus - AI course generation and content assembly
//!
//! Syllabus turns a short course brief into a stored course: a chapter
//! layout from a text model, a banner image, verified video links and
//! per-chapter HTML content. Failures degrade to placeholders instead of
//! losing the course.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use syllabus::{CourseBrief, InMemoryCourseRepository, SyllabusConfig, pipeline_builder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SyllabusConfig::load()?;
//!     let pipeline = pipeline_builder(&config)?
//!         .repository(Arc::new(InMemoryCourseRepository::new()))
//!         .build()?;
//!
//!     let brief = CourseBrief::builder()
//!         .name("Intro to Rust")
//!         .number_of_chapters(3u32)
//!         .build()?;
//!     let course = pipeline.create_layout("me@example.com", &brief).await?;
//!     let course = pipeline.generate_content(course.cid()).await?;
//!     println!("{}", syllabus::render_course(&course));
//!     Ok(())
//! }
//! ```
//!
//! # Cargo Features
//!
//! - `gemini` (default) - HTTP adapters for Gemini, the image service and YouTube
//! - `database` - PostgreSQL persistence
//! - `all` - Enable all features
//!
//! # Architecture
//!
//! - `syllabus_error` - Error types
//! - `syllabus_core` - Course data types and reply normalization
//! - `syllabus_interface` - Capability and repository traits
//! - `syllabus_rate_limit` - Configuration, retry and throttling
//! - `syllabus_models` - HTTP capability adapters
//! - `syllabus_pipeline` - Generation stages and orchestration
//! - `syllabus_database` - PostgreSQL repository
//!
//! This crate re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod bootstrap;
mod output;

pub use bootstrap::{open_repository, pipeline_builder};
pub use output::{render_course, render_course_list, render_report};

// Re-export core crates (always available)
pub use syllabus_core::*;
pub use syllabus_error::*;
pub use syllabus_interface::*;
pub use syllabus_pipeline::{
    CourseAssembler, CourseEvent, CourseEventKind, CourseEvents, CoursePipeline,
    CoursePipelineBuilder, GenerationReport, InMemoryCourseRepository, VideoResolver,
    extract_json, extract_video_id, release_stale_claim,
};
pub use syllabus_rate_limit::{RateLimiter, RetryPolicy, SyllabusConfig};

#[cfg(feature = "gemini")]
pub use syllabus_models::{GeminiClient, HttpVideoProbe, ImageGenClient, YouTubeSearchClient};

#[cfg(feature = "database")]
pub use syllabus_database::{PostgresCourseRepository, establish_connection, establish_pool};
