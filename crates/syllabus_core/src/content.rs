//! Per-chapter generated content.

use crate::ChapterSkeleton;
use serde::{Deserialize, Serialize};

/// Body used for every topic of a chapter whose generation failed.
pub const PLACEHOLDER_BODY: &str = "<p>Content unavailable.</p>";

/// The placeholder HTML fragment for one topic.
///
/// # Examples
///
/// ```
/// use syllabus_core::placeholder_fragment;
///
/// assert_eq!(
///     placeholder_fragment("Closures"),
///     "<h2>Closures</h2><p>Content unavailable.</p>"
/// );
/// ```
pub fn placeholder_fragment(topic: &str) -> String {
    format!("<h2>{topic}</h2>{PLACEHOLDER_BODY}")
}

/// One topic of a chapter with its HTML body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicContent {
    /// Topic title
    pub topic: String,
    /// HTML fragment
    pub content: String,
}

impl TopicContent {
    /// Create a topic entry.
    pub fn new(topic: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            content: content.into(),
        }
    }
}

/// A discovered video attached to a chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRef {
    /// Provider video identifier
    #[serde(rename = "videoId")]
    pub video_id: String,
    /// Watch page URL
    #[serde(rename = "videoWatchUrl")]
    pub watch_url: String,
    /// Video title
    #[serde(rename = "videoTitle", default)]
    pub title: String,
    /// Thumbnail URL
    #[serde(rename = "videoThumbnailUrl", default)]
    pub thumbnail_url: Option<String>,
}

impl VideoRef {
    /// Build a reference whose watch URL is derived from the id.
    ///
    /// # Examples
    ///
    /// ```
    /// use syllabus_core::VideoRef;
    ///
    /// let video = VideoRef::from_id("dQw4w9WgXcQ", "Ownership explained", None);
    /// assert_eq!(video.watch_url, "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
    /// ```
    pub fn from_id(
        video_id: impl Into<String>,
        title: impl Into<String>,
        thumbnail_url: Option<String>,
    ) -> Self {
        let video_id = video_id.into();
        Self {
            watch_url: watch_url_for(&video_id),
            video_id,
            title: title.into(),
            thumbnail_url,
        }
    }
}

/// Canonical watch URL for a video id.
pub fn watch_url_for(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}")
}

/// Generated content for one chapter.
///
/// A chapter whose generation failed is still a valid terminal value: it
/// mirrors the skeleton's topics with placeholder bodies and sets
/// `placeholder`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterContent {
    /// Chapter title, matched back to the skeleton by position
    pub chapter_name: String,
    /// Ordered topics
    #[serde(default)]
    pub topics: Vec<TopicContent>,
    /// Best-effort video
    #[serde(flatten, default)]
    pub video: Option<VideoRef>,
    /// Marks placeholder output
    #[serde(default)]
    pub placeholder: bool,
}

impl ChapterContent {
    /// Placeholder content mirroring a skeleton's topics.
    ///
    /// # Examples
    ///
    /// ```
    /// use syllabus_core::{ChapterContent, ChapterSkeleton, placeholder_fragment};
    ///
    /// let skeleton = ChapterSkeleton::new("Basics", ["A", "B"]);
    /// let content = ChapterContent::placeholder_for(&skeleton);
    /// assert!(content.placeholder);
    /// assert_eq!(content.topics.len(), 2);
    /// assert_eq!(content.topics[1].content, placeholder_fragment("B"));
    /// ```
    pub fn placeholder_for(skeleton: &ChapterSkeleton) -> Self {
        Self {
            chapter_name: skeleton.chapter_name.clone(),
            topics: skeleton
                .topics
                .iter()
                .map(|t| TopicContent::new(t.clone(), placeholder_fragment(t)))
                .collect(),
            video: None,
            placeholder: true,
        }
    }

    /// Attach a video.
    pub fn with_video(mut self, video: Option<VideoRef>) -> Self {
        self.video = video;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn video_fields_are_flattened() {
        let content = ChapterContent {
            chapter_name: "Intro".into(),
            topics: vec![TopicContent::new("A", "<p>a</p>")],
            video: Some(VideoRef::from_id("abcdefghijk", "Intro video", None)),
            placeholder: false,
        };
        let value = serde_json::to_value(&content).unwrap();
        assert_eq!(value["videoId"], "abcdefghijk");
        assert_eq!(value["videoTitle"], "Intro video");

        let back: ChapterContent = serde_json::from_value(value).unwrap();
        assert_eq!(back, content);
    }

    #[test]
    fn missing_video_fields_deserialize_as_none() {
        let json = r#"{"chapterName":"Intro","topics":[{"topic":"A","content":"x"}]}"#;
        let content: ChapterContent = serde_json::from_str(json).unwrap();
        assert!(content.video.is_none());
        assert!(!content.placeholder);
    }
}
