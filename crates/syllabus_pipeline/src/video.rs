//! Video discovery and reachability verification.

use crate::prompts::video_query;
use futures::future::join_all;
use regex::Regex;
use std::sync::{Arc, LazyLock};
use syllabus_core::{CourseLayout, VideoRef};
use syllabus_interface::{VideoProbe, VideoSearch};
use tracing::{debug, instrument, warn};

static VIDEO_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:https?://)?(?:www\.)?(?:m\.)?(?:youtube\.com|youtu\.be)/(?:watch\?v=|embed/|v/|)([\w-]{11})",
    )
    .expect("Valid video id regex")
});

/// Default probe prefix.
pub const EMBED_BASE: &str = "https://www.youtube.com/embed/";

/// Extract the 11-character video id from a YouTube link.
///
/// Accepts `watch?v=`, `youtu.be/`, `/embed/` and `/v/` shapes, with or
/// without scheme, `www.` or `m.`.
///
/// # Examples
///
/// ```
/// use syllabus_pipeline::extract_video_id;
///
/// assert_eq!(extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=1"), Some("dQw4w9WgXcQ"));
/// assert_eq!(extract_video_id("youtu.be/dQw4w9WgXcQ"), Some("dQw4w9WgXcQ"));
/// assert_eq!(extract_video_id("https://m.youtube.com/embed/dQw4w9WgXcQ"), Some("dQw4w9WgXcQ"));
/// assert_eq!(extract_video_id("https://vimeo.com/12345678901"), None);
/// ```
pub fn extract_video_id(url: &str) -> Option<&str> {
    VIDEO_ID
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Finds and verifies videos. Every operation is best-effort and never fails.
#[derive(Clone)]
pub struct VideoResolver {
    search: Option<Arc<dyn VideoSearch>>,
    probe: Arc<dyn VideoProbe>,
    qualifier: String,
    embed_base: String,
}

impl VideoResolver {
    /// Resolver that can verify but not discover.
    pub fn new(probe: Arc<dyn VideoProbe>) -> Self {
        Self {
            search: None,
            probe,
            qualifier: "tutorial".to_string(),
            embed_base: EMBED_BASE.to_string(),
        }
    }

    /// Enable discovery through `search`.
    pub fn with_search(mut self, search: Arc<dyn VideoSearch>) -> Self {
        self.search = Some(search);
        self
    }

    /// Word appended to discovery queries.
    pub fn with_qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.qualifier = qualifier.into();
        self
    }

    /// Prefix the video id is appended to when probing.
    pub fn with_embed_base(mut self, embed_base: impl Into<String>) -> Self {
        self.embed_base = embed_base.into();
        self
    }

    /// Whether discovery is available.
    pub fn can_discover(&self) -> bool {
        self.search.is_some()
    }

    /// Search for `"{subject} {qualifier}"` and take the first hit.
    #[instrument(skip(self))]
    pub async fn discover(&self, subject: &str) -> Option<VideoRef> {
        let search = self.search.as_ref()?;
        let query = video_query(subject, &self.qualifier);
        match search.search(&query).await {
            Ok(hits) => {
                let hit = hits.into_iter().next();
                if hit.is_none() {
                    debug!(%query, "No videos found");
                }
                hit.map(|h| VideoRef::from_id(h.video_id, h.title, h.thumbnail_url))
            }
            Err(e) => {
                warn!(%query, error = %e, "Video search failed");
                None
            }
        }
    }

    /// Check that the embed page for `url` answers 2xx.
    ///
    /// Returns the original URL when reachable. Unrecognized links,
    /// non-2xx statuses, timeouts and network errors all yield `None`.
    #[instrument(skip(self))]
    pub async fn verify(&self, url: &str) -> Option<String> {
        let id = extract_video_id(url)?;
        let embed_url = format!("{}{}", self.embed_base, id);
        match self.probe.head_check(&embed_url).await {
            Ok(status) if (200..300).contains(&status) => Some(url.to_string()),
            Ok(status) => {
                debug!(status, "Video not embeddable");
                None
            }
            Err(e) => {
                debug!(error = %e, "Video probe failed");
                None
            }
        }
    }

    /// Discover a video for a chapter subject, then verify it.
    pub async fn resolve_for_chapter(&self, subject: &str) -> Option<VideoRef> {
        let video = self.discover(subject).await?;
        self.verify(&video.watch_url).await?;
        Some(video)
    }

    /// Verify every chapter link concurrently, nulling the unreachable ones.
    ///
    /// Returns how many links were removed.
    #[instrument(skip_all, fields(chapters = layout.chapters.len()))]
    pub async fn verify_layout(&self, layout: &mut CourseLayout) -> usize {
        let checks = layout.chapters.iter().map(|chapter| async move {
            match chapter.video_url.as_deref() {
                Some(url) => self.verify(url).await.is_some(),
                None => true,
            }
        });
        let results = join_all(checks).await;

        let mut removed = 0;
        for (chapter, reachable) in layout.chapters.iter_mut().zip(results) {
            if !reachable {
                warn!(chapter = %chapter.chapter_name, url = ?chapter.video_url, "Video not accessible, removing link");
                chapter.video_url = None;
                removed += 1;
            }
        }
        removed
    }
}

impl std::fmt::Debug for VideoResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoResolver")
            .field("can_discover", &self.can_discover())
            .field("qualifier", &self.qualifier)
            .field("embed_base", &self.embed_base)
            .finish()
    }
}
