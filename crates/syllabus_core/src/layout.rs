//! Course skeleton produced by the layout stage.

use serde::{Deserialize, Serialize};

/// One chapter of a generated layout.
///
/// Produced by the layout stage and later enriched in place: the video
/// resolver may null out or fill `video_url`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterSkeleton {
    /// Chapter title; used as a correlation key, not guaranteed unique
    pub chapter_name: String,
    /// Ordered topic titles
    #[serde(default)]
    pub topics: Vec<String>,
    /// Optional human-readable duration ("45 minutes")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    /// Candidate or verified video link, `None` when unavailable
    #[serde(default)]
    pub video_url: Option<String>,
}

impl ChapterSkeleton {
    /// Create a chapter without duration or video.
    ///
    /// # Examples
    ///
    /// ```
    /// use syllabus_core::ChapterSkeleton;
    ///
    /// let chapter = ChapterSkeleton::new("Ownership", ["Moves", "Borrows"]);
    /// assert_eq!(chapter.topics.len(), 2);
    /// assert!(chapter.video_url.is_none());
    /// ```
    pub fn new<I, S>(chapter_name: impl Into<String>, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            chapter_name: chapter_name.into(),
            topics: topics.into_iter().map(Into::into).collect(),
            duration: None,
            video_url: None,
        }
    }

    /// Attach a video link.
    pub fn with_video_url(mut self, url: impl Into<String>) -> Self {
        self.video_url = Some(url.into());
        self
    }
}

/// The generated course skeleton prior to content expansion.
///
/// The chapter count should match the brief but is never enforced; a model
/// returning fewer chapters still yields a persistable layout.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseLayout {
    /// Course title
    pub name: String,
    /// Course description
    #[serde(default)]
    pub description: String,
    /// Subject category
    #[serde(default)]
    pub category: String,
    /// Difficulty level
    #[serde(default)]
    pub level: String,
    /// Whether chapters should carry video links
    #[serde(default)]
    pub include_video: bool,
    /// Prompt handed to the banner image stage
    #[serde(default)]
    pub banner_image_prompt: String,
    /// Ordered chapters
    #[serde(default)]
    pub chapters: Vec<ChapterSkeleton>,
    /// Original model reply when it could not be parsed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl CourseLayout {
    /// A layout with at least one chapter can be browsed before content exists.
    pub fn is_browsable(&self) -> bool {
        !self.chapters.is_empty()
    }

    /// Whether any chapter carries a video link.
    pub fn has_video_links(&self) -> bool {
        self.chapters.iter().any(|c| c.video_url.is_some())
    }

    /// Whether the model reply could not be parsed and was kept verbatim.
    pub fn is_unparsed(&self) -> bool {
        self.raw.is_some()
    }
}
