//! Per-chapter content generation.

use crate::{ModelInvoker, VideoResolver, extract_json, prompts};
use futures::future::join_all;
use syllabus_core::{ChapterContent, ChapterSkeleton, CourseLayout, normalize_chapter_content};
use tracing::{info, instrument, warn};

/// Expands layout chapters into HTML content.
///
/// Chapters are independent: a failure in one produces a placeholder for
/// that chapter only.
#[derive(Debug, Clone)]
pub struct ChapterContentGenerator {
    invoker: ModelInvoker,
    resolver: Option<VideoResolver>,
}

impl ChapterContentGenerator {
    /// Generator without video attachment.
    pub fn new(invoker: ModelInvoker) -> Self {
        Self {
            invoker,
            resolver: None,
        }
    }

    /// Attach discovered videos to chapters of courses that include video.
    pub fn with_resolver(mut self, resolver: VideoResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Generate content for every chapter of `layout`, concurrently.
    ///
    /// The result has one entry per chapter, in layout order. It always
    /// completes: failed chapters become placeholders.
    #[instrument(skip_all, fields(course = %layout.name, chapters = layout.chapters.len()))]
    pub async fn generate_all(&self, layout: &CourseLayout) -> Vec<ChapterContent> {
        let tasks = layout
            .chapters
            .iter()
            .map(|chapter| self.generate_chapter(chapter, layout.include_video));
        let contents = join_all(tasks).await;

        let placeholders = contents.iter().filter(|c| c.placeholder).count();
        info!(
            generated = contents.len() - placeholders,
            placeholders, "Chapter content generated"
        );
        contents
    }

    /// Generate content for one chapter.
    ///
    /// Invoker failures, empty replies and unparsable replies all produce
    /// [`ChapterContent::placeholder_for`] the skeleton.
    #[instrument(skip(self, chapter), fields(chapter = %chapter.chapter_name))]
    pub async fn generate_chapter(&self, chapter: &ChapterSkeleton, include_video: bool) -> ChapterContent {
        let Some(content) = self.request_chapter(chapter).await else {
            return ChapterContent::placeholder_for(chapter);
        };

        let video = match (&self.resolver, include_video) {
            (Some(resolver), true) => resolver.discover(&chapter.chapter_name).await,
            _ => None,
        };
        content.with_video(video)
    }

    async fn request_chapter(&self, chapter: &ChapterSkeleton) -> Option<ChapterContent> {
        let prompt = match prompts::chapter_prompt(chapter) {
            Ok(prompt) => prompt,
            Err(e) => {
                warn!(error = %e, "Could not build chapter prompt");
                return None;
            }
        };

        let reply = match self.invoker.invoke(&prompt).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "Chapter generation failed");
                return None;
            }
        };
        if reply.trim().is_empty() {
            warn!("Model returned no text for chapter");
            return None;
        }

        let Some(value) = extract_json(&reply) else {
            warn!("Failed to parse JSON for chapter");
            return None;
        };
        let content = normalize_chapter_content(&value, chapter);
        if content.is_none() {
            warn!("Chapter reply carried no topics");
        }
        content
    }
}
