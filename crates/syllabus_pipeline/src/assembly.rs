//! Field-scoped persistence of pipeline outputs.

use crate::{CourseEventKind, CourseEvents};
use std::sync::Arc;
use syllabus_core::{ChapterContent, CourseLayout, CourseStatus, ImageRef};
use syllabus_error::{GenerationError, GenerationErrorKind, SyllabusResult};
use syllabus_interface::CourseRepository;
use tracing::{debug, instrument};

/// Writes each stage's output to the repository, touching only the fields
/// that stage owns.
///
/// Every write is idempotent: repeating it with the same value leaves the
/// record unchanged.
#[derive(Clone)]
pub struct CourseAssembler {
    repository: Arc<dyn CourseRepository>,
    events: CourseEvents,
}

impl CourseAssembler {
    /// Create an assembler.
    pub fn new(repository: Arc<dyn CourseRepository>, events: CourseEvents) -> Self {
        Self { repository, events }
    }

    /// The underlying repository.
    pub fn repository(&self) -> &Arc<dyn CourseRepository> {
        &self.repository
    }

    /// The event channel writes are announced on.
    pub fn events(&self) -> &CourseEvents {
        &self.events
    }

    /// Write the layout and mark the course `LaidOut` if it was `Created`.
    ///
    /// # Errors
    ///
    /// Fails if the course does not exist or the write fails.
    #[instrument(skip(self, layout), fields(chapters = layout.chapters.len()))]
    pub async fn persist_layout(&self, cid: &str, layout: &CourseLayout) -> SyllabusResult<()> {
        self.repository.update_layout(cid, layout).await?;
        self.repository
            .transition_status(cid, &[CourseStatus::Created], CourseStatus::LaidOut)
            .await?;
        debug!("Layout persisted");
        self.events.publish(cid, CourseEventKind::LayoutPersisted);
        Ok(())
    }

    /// Write the banner reference; `None` records that no banner is available.
    ///
    /// # Errors
    ///
    /// Fails if the course does not exist or the write fails.
    #[instrument(skip(self, banner), fields(has_banner = banner.is_some()))]
    pub async fn persist_banner(&self, cid: &str, banner: Option<&ImageRef>) -> SyllabusResult<()> {
        self.repository.update_banner(cid, banner).await?;
        debug!("Banner persisted");
        self.events.publish(cid, CourseEventKind::BannerPersisted);
        Ok(())
    }

    /// Mark a laid-out course `Enriched`.
    ///
    /// # Errors
    ///
    /// Fails if the course does not exist.
    pub async fn mark_enriched(&self, cid: &str) -> SyllabusResult<bool> {
        self.repository
            .transition_status(cid, &[CourseStatus::LaidOut], CourseStatus::Enriched)
            .await
    }

    /// Replace the whole content array in one write.
    ///
    /// Placeholder chapters are stored like any other chapter.
    ///
    /// # Errors
    ///
    /// Fails with `CourseNotFound` for an unknown course and `LayoutMissing`
    /// when the course has no layout yet.
    #[instrument(skip(self, contents), fields(chapters = contents.len()))]
    pub async fn persist_content(&self, cid: &str, contents: &[ChapterContent]) -> SyllabusResult<()> {
        let course = self.repository.get_course(cid).await?.ok_or_else(|| {
            GenerationError::new(GenerationErrorKind::CourseNotFound(cid.to_string()))
        })?;
        if course.course_json().is_none() {
            return Err(
                GenerationError::new(GenerationErrorKind::LayoutMissing(cid.to_string())).into(),
            );
        }

        self.repository.update_content(cid, contents).await?;
        debug!("Content persisted");
        self.events.publish(cid, CourseEventKind::ContentPersisted);
        Ok(())
    }
}

impl std::fmt::Debug for CourseAssembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CourseAssembler")
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}
