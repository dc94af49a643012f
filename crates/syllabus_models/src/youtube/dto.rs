//! YouTube Data API v3 search response objects.

use serde::{Deserialize, Serialize};
use syllabus_interface::VideoSearchHit;

/// Search response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Matching items
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

/// One search result.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchItem {
    /// Resource identifier
    #[serde(default)]
    pub id: SearchItemId,
    /// Title and thumbnails
    #[serde(default)]
    pub snippet: Option<Snippet>,
}

/// Resource identifier of a result.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItemId {
    /// Present for video results
    #[serde(default)]
    pub video_id: Option<String>,
}

/// Descriptive fields of a result.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Snippet {
    /// Video title
    #[serde(default)]
    pub title: String,
    /// Thumbnails by size
    #[serde(default)]
    pub thumbnails: Thumbnails,
}

/// Thumbnail set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Thumbnails {
    /// Default size
    #[serde(default)]
    pub default: Option<Thumbnail>,
}

/// One thumbnail.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Thumbnail {
    /// Image URL
    pub url: String,
}

impl SearchResponse {
    /// Video results in ranking order; channel and playlist results are skipped.
    pub fn into_hits(self) -> Vec<VideoSearchHit> {
        self.items
            .into_iter()
            .filter_map(|item| {
                let video_id = item.id.video_id?;
                let (title, thumbnail_url) = match item.snippet {
                    Some(snippet) => (snippet.title, snippet.thumbnails.default.map(|t| t.url)),
                    None => (String::new(), None),
                };
                Some(VideoSearchHit {
                    video_id,
                    title,
                    thumbnail_url,
                })
            })
            .collect()
    }
}
