//! The user-submitted course request.

use serde::{Deserialize, Serialize};
use syllabus_error::{GenerationError, GenerationErrorKind};

/// Parameters of a course request.
///
/// A brief is immutable once submitted; every later stage reads it but none
/// writes it back.
///
/// # Examples
///
/// ```
/// use syllabus_core::CourseBrief;
///
/// let brief = CourseBrief::builder()
///     .name("Intro to Rust")
///     .description("Ownership, borrowing and lifetimes")
///     .level("Beginner")
///     .number_of_chapters(3u32)
///     .include_video(true)
///     .build()
///     .unwrap();
///
/// assert!(brief.validate().is_ok());
/// assert_eq!(brief.number_of_chapters, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_builder::Builder)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct CourseBrief {
    /// Course title
    pub name: String,
    /// Free-text description of what the course covers
    #[serde(default)]
    #[builder(default)]
    pub description: String,
    /// Subject category (e.g. "Programming")
    #[serde(default)]
    #[builder(default)]
    pub category: String,
    /// Difficulty level (e.g. "Beginner", "Intermediate", "Advanced")
    #[serde(default)]
    #[builder(default)]
    pub level: String,
    /// Requested number of chapters
    pub number_of_chapters: u32,
    /// Whether chapters should carry video links
    #[serde(default)]
    #[builder(default)]
    pub include_video: bool,
}

impl CourseBrief {
    /// Creates a new brief builder.
    pub fn builder() -> CourseBriefBuilder {
        CourseBriefBuilder::default()
    }

    /// Reject briefs the pipeline cannot act on.
    ///
    /// # Errors
    ///
    /// Returns `InvalidBrief` when the name is blank or no chapters are requested.
    #[track_caller]
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.name.trim().is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::InvalidBrief(
                "name is required".to_string(),
            )));
        }
        if self.number_of_chapters == 0 {
            return Err(GenerationError::new(GenerationErrorKind::InvalidBrief(
                "numberOfChapters must be positive".to_string(),
            )));
        }
        Ok(())
    }
}
