//! Errors raised by external capabilities (text, image, video) and retry classification.

/// Failure conditions reported by an external generation or search capability.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ModelErrorKind {
    /// API key not found in environment
    #[display("{} environment variable not set", _0)]
    MissingApiKey(String),
    /// The provider reported it is overloaded or temporarily unavailable
    #[display("Model unavailable: {}", _0)]
    Unavailable(String),
    /// The provider rejected the call because of quota or rate limits
    #[display("Rate limited: {}", _0)]
    RateLimited(String),
    /// The provider rejected the request itself (bad prompt, bad parameters)
    #[display("Invalid input: {}", _0)]
    InvalidInput(String),
    /// Any other non-success HTTP status
    #[display("HTTP {} error: {}", status_code, message)]
    HttpStatus {
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },
    /// The call succeeded but carried no usable text or image
    #[display("Empty response from {}", _0)]
    EmptyResponse(String),
    /// Request could not be sent or the response body could not be decoded
    #[display("Request failed: {}", _0)]
    Request(String),
}

impl ModelErrorKind {
    /// Map an HTTP status and provider message onto an error kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use syllabus_error::ModelErrorKind;
    ///
    /// let kind = ModelErrorKind::from_status(503, "The model is overloaded");
    /// assert!(kind.is_retryable());
    ///
    /// let kind = ModelErrorKind::from_status(400, "Invalid argument");
    /// assert!(!kind.is_retryable());
    /// ```
    pub fn from_status(status_code: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status_code {
            503 => Self::Unavailable(message),
            429 => Self::RateLimited(message),
            400 | 422 => Self::InvalidInput(message),
            _ => Self::HttpStatus {
                status_code,
                message,
            },
        }
    }

    /// Check if this error is transient and the call should be retried.
    ///
    /// Only "busy" conditions qualify. Malformed input and other HTTP
    /// failures are surfaced immediately.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::RateLimited(_))
    }
}

/// Capability error with source location tracking.
///
/// # Examples
///
/// ```
/// use syllabus_error::{ModelError, ModelErrorKind};
///
/// let err = ModelError::new(ModelErrorKind::MissingApiKey("GOOGLE_AI_API_KEY".into()));
/// assert!(format!("{}", err).contains("GOOGLE_AI_API_KEY"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Model Error: {} at line {} in {}", kind, line, file)]
pub struct ModelError {
    /// The kind of error that occurred
    pub kind: ModelErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ModelError {
    /// Create a new ModelError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ModelErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Trait for errors that support retry logic.
///
/// # Examples
///
/// ```
/// use syllabus_error::{ModelError, ModelErrorKind, RetryableError};
///
/// let err = ModelError::new(ModelErrorKind::Unavailable("overloaded".to_string()));
/// assert!(err.is_retryable());
///
/// let err = ModelError::new(ModelErrorKind::InvalidInput("bad schema".to_string()));
/// assert!(!err.is_retryable());
/// ```
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    ///
    /// Transient errors like 503 (service unavailable) or 429 (rate limit)
    /// return true. Permanent errors like 400 (bad request) return false.
    fn is_retryable(&self) -> bool;
}

impl RetryableError for ModelError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}
