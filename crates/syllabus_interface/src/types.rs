//! Request and result types exchanged with external capabilities.

use serde::{Deserialize, Serialize};

/// Parameters of one image-generation call.
///
/// # Examples
///
/// ```
/// use syllabus_interface::ImageRequest;
///
/// let request = ImageRequest::banner("flat illustration of a crab");
/// assert_eq!(request.width, 1024);
/// assert_eq!(request.aspect_ratio, "16:9");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRequest {
    /// Text prompt
    pub prompt: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Requested aspect ratio ("16:9")
    pub aspect_ratio: String,
}

impl ImageRequest {
    /// A course banner request with the standard dimensions.
    pub fn banner(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            width: 1024,
            height: 1024,
            aspect_ratio: "16:9".to_string(),
        }
    }
}

/// One result of a video search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSearchHit {
    /// Provider video identifier
    pub video_id: String,
    /// Video title
    pub title: String,
    /// Default thumbnail
    pub thumbnail_url: Option<String>,
}
