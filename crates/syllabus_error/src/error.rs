//! Top-level error wrapper types.

#[cfg(feature = "database")]
use crate::DatabaseError;
use crate::{
    ConfigError, GenerationError, GenerationErrorKind, HttpError, JsonError, ModelError,
    RetryableError,
};

/// Every failure the pipeline can surface.
///
/// # Examples
///
/// ```
/// use syllabus_error::{SyllabusError, HttpError};
///
/// let http_err = HttpError::new("Connection refused");
/// let err: SyllabusError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum SyllabusErrorKind {
    /// HTTP transport error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// External capability error
    #[from(ModelError)]
    Model(ModelError),
    /// Fatal pipeline error
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Database error
    #[cfg(feature = "database")]
    #[from(DatabaseError)]
    Database(DatabaseError),
}

/// Syllabus error with kind discrimination.
///
/// # Examples
///
/// ```
/// use syllabus_error::{SyllabusError, SyllabusResult, ConfigError};
///
/// fn might_fail() -> SyllabusResult<()> {
///     Err(ConfigError::new("retry.max_retries must be at least 1"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Syllabus Error: {}", _0)]
pub struct SyllabusError(Box<SyllabusErrorKind>);

impl SyllabusError {
    /// Create a new error from a kind.
    pub fn new(kind: SyllabusErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &SyllabusErrorKind {
        &self.0
    }

    /// The pipeline error kind, if this is a fatal pipeline error.
    pub fn generation_kind(&self) -> Option<&GenerationErrorKind> {
        match self.kind() {
            SyllabusErrorKind::Generation(err) => Some(&err.kind),
            _ => None,
        }
    }
}

// Generic From implementation for any type that converts to SyllabusErrorKind
impl<T> From<T> for SyllabusError
where
    T: Into<SyllabusErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

impl RetryableError for SyllabusError {
    fn is_retryable(&self) -> bool {
        match self.kind() {
            SyllabusErrorKind::Model(err) => err.is_retryable(),
            _ => false,
        }
    }
}

/// Result type for Syllabus operations.
///
/// # Examples
///
/// ```
/// use syllabus_error::{SyllabusResult, HttpError};
///
/// fn fetch_banner() -> SyllabusResult<String> {
///     Err(HttpError::new("504 Gateway Timeout"))?
/// }
/// ```
pub type SyllabusResult<T> = std::result::Result<T, SyllabusError>;
