//! HTTP transport error types.

/// Transport-level failure talking to an external capability (timeouts,
/// connection resets, TLS failures) with source location.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("HTTP Error: {} at line {} in {}", message, line, file)]
pub struct HttpError {
    /// The underlying error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl HttpError {
    /// Create a new HttpError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use syllabus_error::HttpError;
    ///
    /// let err = HttpError::new("search.googleapis.com: connection reset");
    /// assert!(err.file.ends_with(".rs"));
    /// assert!(err.to_string().starts_with("HTTP Error: search.googleapis.com"));
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

    /// A request to `target` failed in transport.
    ///
    /// Transport failures are never retried by the model invoker: a probe
    /// that times out means the video is treated as unreachable, and a
    /// model call that cannot connect fails fast.
    ///
    /// # Examples
    ///
    /// ```
    /// use syllabus_error::{HttpError, RetryableError, SyllabusError};
    ///
    /// let err: SyllabusError =
    ///     HttpError::request("HEAD https://www.youtube.com/embed/dQw4w9WgXcQ", "operation timed out").into();
    /// assert!(!err.is_retryable());
    /// assert!(err.to_string().contains("HEAD https://www.youtube.com/embed/dQw4w9WgXcQ failed"));
    /// ```
    #[track_caller]
    pub fn request(target: impl std::fmt::Display, err: impl std::fmt::Display) -> Self {
        Self::new(format!("{target} failed: {err}"))
    }

    /// The HTTP client for an adapter could not be constructed.
    #[track_caller]
    pub fn client(err: impl std::fmt::Display) -> Self {
        Self::new(format!("Failed to build HTTP client: {err}"))
    }
}
