//! Ownership of a course while content is being generated.

use std::sync::Arc;
use syllabus_core::{Course, CourseStatus};
use syllabus_error::{GenerationError, GenerationErrorKind, SyllabusResult};
use syllabus_interface::CourseRepository;
use tracing::{debug, instrument, warn};

/// Statuses from which content generation may claim a course.
pub const CLAIMABLE: &[CourseStatus] = &[
    CourseStatus::LaidOut,
    CourseStatus::Enriched,
    CourseStatus::Generated,
];

/// A course held in `Generating` by one run.
///
/// Finish with [`complete`](Self::complete) or [`release`](Self::release).
/// A claim dropped without either (cancelled future, panic, failed final
/// transition) schedules the prior status to be restored on the current
/// runtime, so the course never stays locked.
pub struct ContentClaim {
    repository: Arc<dyn CourseRepository>,
    cid: String,
    prior: CourseStatus,
    armed: bool,
}

impl ContentClaim {
    /// Try to move `course` into `Generating`.
    ///
    /// Returns `None` when the course is not in a claimable status.
    pub(crate) async fn acquire(
        repository: &Arc<dyn CourseRepository>,
        course: &Course,
    ) -> SyllabusResult<Option<Self>> {
        let claimed = repository
            .transition_status(course.cid(), CLAIMABLE, CourseStatus::Generating)
            .await?;
        if !claimed {
            return Ok(None);
        }
        debug!(cid = %course.cid(), prior = %course.status(), "Course claimed");
        Ok(Some(Self {
            repository: Arc::clone(repository),
            cid: course.cid().clone(),
            prior: *course.status(),
            armed: true,
        }))
    }

    /// Status the course held before the claim.
    pub fn prior(&self) -> CourseStatus {
        self.prior
    }

    /// Move the course from `Generating` to `to`.
    ///
    /// # Errors
    ///
    /// Fails if the repository fails; the prior status is then restored
    /// in the background.
    pub async fn complete(mut self, to: CourseStatus) -> SyllabusResult<()> {
        self.repository
            .transition_status(&self.cid, &[CourseStatus::Generating], to)
            .await?;
        self.armed = false;
        Ok(())
    }

    /// Put the prior status back. Failures are logged.
    pub async fn release(mut self) {
        self.armed = false;
        if let Err(e) = self
            .repository
            .transition_status(&self.cid, &[CourseStatus::Generating], self.prior)
            .await
        {
            warn!(cid = %self.cid, error = %e, "Failed to restore status");
        }
    }
}

impl Drop for ContentClaim {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        warn!(cid = %self.cid, prior = %self.prior, "Content claim dropped, restoring status");
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!(cid = %self.cid, "No runtime to restore status; course stays Generating");
            return;
        };
        let repository = Arc::clone(&self.repository);
        let cid = std::mem::take(&mut self.cid);
        let prior = self.prior;
        handle.spawn(async move {
            if let Err(e) = repository
                .transition_status(&cid, &[CourseStatus::Generating], prior)
                .await
            {
                warn!(%cid, error = %e, "Failed to restore status");
            }
        });
    }
}

/// Status a course should settle in when no run owns it.
///
/// Used to recover a course left in `Generating` by a process that died
/// mid-run.
pub fn settled_status(course: &Course) -> CourseStatus {
    let has_layout = course.course_json().is_some();
    let has_content = course
        .courses_content()
        .as_ref()
        .is_some_and(|c| !c.is_empty());
    let enriched = course.banner_image_url().is_some()
        || course
            .course_json()
            .as_ref()
            .is_some_and(|l| l.has_video_links());
    match (has_layout, has_content, enriched) {
        (false, _, _) => CourseStatus::Created,
        (true, true, _) => CourseStatus::Generated,
        (true, false, true) => CourseStatus::Enriched,
        (true, false, false) => CourseStatus::LaidOut,
    }
}

/// Force a course out of `Generating` after a run died without releasing it.
///
/// The course settles in the status its stored fields support. A course
/// that is not `Generating` is left untouched. Returns the resulting status.
///
/// Only call this when no run is in flight; a live run that later
/// finishes still writes its content.
///
/// # Errors
///
/// Fails with `CourseNotFound` or a repository error.
#[instrument(skip(repository))]
pub async fn release_stale_claim(
    repository: &dyn CourseRepository,
    cid: &str,
) -> SyllabusResult<CourseStatus> {
    let course = load(repository, cid).await?;
    if *course.status() != CourseStatus::Generating {
        return Ok(*course.status());
    }
    let settled = settled_status(&course);
    if repository
        .transition_status(cid, &[CourseStatus::Generating], settled)
        .await?
    {
        warn!(%cid, status = %settled, "Released stale generation claim");
        return Ok(settled);
    }
    Ok(*load(repository, cid).await?.status())
}

async fn load(repository: &dyn CourseRepository, cid: &str) -> SyllabusResult<Course> {
    repository.get_course(cid).await?.ok_or_else(|| {
        GenerationError::new(GenerationErrorKind::CourseNotFound(cid.to_string())).into()
    })
}
