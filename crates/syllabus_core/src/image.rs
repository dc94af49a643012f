//! Displayable banner image references.

use serde::{Deserialize, Serialize};

/// Minimum payload length before a bare string is treated as inline base64.
pub const BASE64_MIN_LEN: usize = 200;

/// Banner image reference: a remote URL or an inline data URI.
///
/// Serialized as a plain string so it can live in a nullable text column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ImageRef {
    /// Remote URL returned by the image service
    Url(String),
    /// `data:image/png;base64,...` built from an inline payload
    DataUri(String),
}

impl ImageRef {
    /// Normalize an image-service payload into a displayable reference.
    ///
    /// Payloads made only of base64 characters (whitespace allowed), longer
    /// than [`BASE64_MIN_LEN`], are wrapped as a PNG data URI with whitespace
    /// stripped. Anything else is taken as a ready-to-use URL. Blank payloads
    /// yield `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use syllabus_core::ImageRef;
    ///
    /// let url = ImageRef::from_payload("https://cdn.example.com/banner.png").unwrap();
    /// assert_eq!(url, ImageRef::Url("https://cdn.example.com/banner.png".into()));
    ///
    /// let encoded = "QUJD".repeat(60);
    /// let inline = ImageRef::from_payload(&format!("{}\n{}", &encoded[..100], &encoded[100..])).unwrap();
    /// assert_eq!(inline.as_str(), format!("data:image/png;base64,{encoded}"));
    ///
    /// assert!(ImageRef::from_payload("  ").is_none());
    /// ```
    pub fn from_payload(payload: &str) -> Option<Self> {
        let trimmed = payload.trim();
        if trimmed.is_empty() {
            return None;
        }
        if looks_like_base64(payload) {
            let cleaned: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
            return Some(Self::DataUri(format!("data:image/png;base64,{cleaned}")));
        }
        Some(Self::Url(trimmed.to_string()))
    }

    /// The displayable reference.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Url(s) | Self::DataUri(s) => s,
        }
    }

    /// Whether the image is embedded rather than linked.
    pub fn is_inline(&self) -> bool {
        matches!(self, Self::DataUri(_))
    }
}

fn looks_like_base64(payload: &str) -> bool {
    payload.len() > BASE64_MIN_LEN
        && payload
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '=') || c.is_whitespace())
}

impl From<String> for ImageRef {
    fn from(value: String) -> Self {
        if value.starts_with("data:") {
            Self::DataUri(value)
        } else {
            Self::Url(value)
        }
    }
}

impl From<ImageRef> for String {
    fn from(value: ImageRef) -> Self {
        match value {
            ImageRef::Url(s) | ImageRef::DataUri(s) => s,
        }
    }
}

impl std::fmt::Display for ImageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
