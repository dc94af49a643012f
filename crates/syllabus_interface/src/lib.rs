//! Trait definitions for the Syllabus course-generation pipeline.
//!
//! The pipeline only talks to the outside world through these traits:
//! text, image and video capabilities, a reachability probe, and the course
//! repository.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod repository;
mod traits;
mod types;

pub use repository::CourseRepository;
pub use traits::{ImageGenerator, TextGenerator, VideoProbe, VideoSearch};
pub use types::{ImageRequest, VideoSearchHit};
