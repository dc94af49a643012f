//! Error types for the Syllabus course-generation pipeline.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! Only fatal conditions are errors. Degraded outcomes (placeholder chapters,
//! a missing banner, an unavailable video) are modelled as data, not errors.
//!
//! # Examples
//!
//! ```
//! use syllabus_error::{SyllabusResult, GenerationError, GenerationErrorKind};
//!
//! fn generate() -> SyllabusResult<String> {
//!     Err(GenerationError::new(GenerationErrorKind::GenerationFailed(
//!         "no content generated".into(),
//!     )))?
//! }
//!
//! match generate() {
//!     Ok(text) => println!("Got: {}", text),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
#[cfg(feature = "database")]
mod database;
mod error;
mod generation;
mod http;
mod json;
mod model;

pub use config::ConfigError;
#[cfg(feature = "database")]
pub use database::{DatabaseError, DatabaseErrorKind};
pub use error::{SyllabusError, SyllabusErrorKind, SyllabusResult};
pub use generation::{GenerationError, GenerationErrorKind};
pub use http::HttpError;
pub use json::JsonError;
pub use model::{ModelError, ModelErrorKind, RetryableError};
