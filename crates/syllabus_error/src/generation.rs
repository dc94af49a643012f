//! Pipeline-level (fatal) error types.

/// Fatal conditions that abort a course-generation operation.
///
/// Degraded outcomes (unparsable chapter output, missing banner, unavailable
/// video) are never represented here; they produce placeholder or empty
/// fields instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GenerationErrorKind {
    /// The model returned no text at all
    #[display("Generation failed: {}", _0)]
    GenerationFailed(String),
    /// The submitted brief is missing required fields
    #[display("Invalid course brief: {}", _0)]
    InvalidBrief(String),
    /// Every attempt hit a transient failure
    #[display("Gave up after {} attempts: {}", attempts, last_error)]
    RetriesExhausted {
        /// Number of attempts made
        attempts: usize,
        /// Message of the final failure
        last_error: String,
    },
    /// Content was submitted for a course that has no layout yet
    #[display("Course '{}' has no layout; content is always layout-scoped", _0)]
    LayoutMissing(String),
    /// Another pipeline currently owns the course
    #[display("Course '{}' is already being generated", _0)]
    GenerationInProgress(String),
    /// No course with this identifier exists
    #[display("Course '{}' not found", _0)]
    CourseNotFound(String),
    /// Chapter index outside the course layout
    #[display("Chapter {} out of range (course has {} chapters)", index, len)]
    ChapterOutOfRange {
        /// Requested index
        index: usize,
        /// Number of chapters in the layout
        len: usize,
    },
}

/// Pipeline error with source location tracking.
///
/// # Examples
///
/// ```
/// use syllabus_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::LayoutMissing("c-1".into()));
/// assert!(format!("{}", err).contains("no layout"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The specific error condition
    pub kind: GenerationErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
