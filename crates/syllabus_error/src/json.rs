//! JSON error types.

/// Failure to serialize a course document or decode a capability payload.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("JSON Error: {} at line {} in {}", message, line, file)]
pub struct JsonError {
    /// The underlying error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl JsonError {
    /// Create a new JsonError at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use syllabus_error::JsonError;
    ///
    /// let err = JsonError::new("courseJson is not an object");
    /// assert!(err.to_string().starts_with("JSON Error: courseJson"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// `what` could not be serialized, e.g. a brief embedded in a prompt.
    ///
    /// # Examples
    ///
    /// ```
    /// use syllabus_error::{JsonError, SyllabusError, SyllabusErrorKind};
    ///
    /// let err: SyllabusError = JsonError::serialize("course brief", "key must be a string").into();
    /// assert!(matches!(err.kind(), SyllabusErrorKind::Json(_)));
    /// assert!(err.to_string().contains("Failed to serialize course brief"));
    /// ```
    #[track_caller]
    pub fn serialize(what: &str, err: impl std::fmt::Display) -> Self {
        Self::new(format!("Failed to serialize {what}: {err}"))
    }
}

