//! Persistence collaborator for course records.

use async_trait::async_trait;
use syllabus_core::{ChapterContent, Course, CourseLayout, CourseStatus, ImageRef, NewCourse};
use syllabus_error::SyllabusResult;

/// Storage for course records.
///
/// Every update is scoped to the fields one pipeline stage owns, so stages
/// never overwrite each other. Updates on an unknown `cid` fail with
/// `CourseNotFound`.
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Insert a new record in the `Created` state.
    async fn create_course(&self, new: NewCourse) -> SyllabusResult<Course>;

    /// Load one course.
    async fn get_course(&self, cid: &str) -> SyllabusResult<Option<Course>>;

    /// All courses owned by a user, newest first.
    async fn list_courses(&self, user_email: &str) -> SyllabusResult<Vec<Course>>;

    /// Replace the layout document.
    async fn update_layout(&self, cid: &str, layout: &CourseLayout) -> SyllabusResult<()>;

    /// Replace the banner reference.
    async fn update_banner(&self, cid: &str, banner: Option<&ImageRef>) -> SyllabusResult<()>;

    /// Replace the whole content array in one write.
    async fn update_content(&self, cid: &str, content: &[ChapterContent]) -> SyllabusResult<()>;

    /// Atomically move to `to` if the current status is one of `allowed_from`.
    ///
    /// Returns `false` without writing when the current status does not match.
    async fn transition_status(
        &self,
        cid: &str,
        allowed_from: &[CourseStatus],
        to: CourseStatus,
    ) -> SyllabusResult<bool>;

    /// Remove a record. Returns whether anything was deleted.
    async fn delete_course(&self, cid: &str) -> SyllabusResult<bool>;
}
