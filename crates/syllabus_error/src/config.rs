//! Configuration error types.

/// Invalid or unreadable configuration (missing API key, bad TOML, zero retries).
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use syllabus_error::ConfigError;
    ///
    /// let err = ConfigError::new("retry.max_retries must be at least 1");
    /// assert!(err.to_string().starts_with("Configuration Error: retry.max_retries"));
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

    /// A pipeline was assembled without a capability it cannot run without.
    ///
    /// # Examples
    ///
    /// ```
    /// use syllabus_error::{ConfigError, RetryableError, SyllabusResult};
    ///
    /// fn require_text_model(configured: bool) -> SyllabusResult<()> {
    ///     if !configured {
    ///         Err(ConfigError::missing("text generator"))?
    ///     }
    ///     Ok(())
    /// }
    ///
    /// let err = require_text_model(false).unwrap_err();
    /// assert!(!err.is_retryable());
    /// assert!(err.to_string().contains("CoursePipeline requires a text generator"));
    /// ```
    #[track_caller]
    pub fn missing(capability: &str) -> Self {
        Self::new(format!("CoursePipeline requires a {capability}"))
    }
}
