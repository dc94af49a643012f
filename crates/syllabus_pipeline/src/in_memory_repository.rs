//! In-memory implementation of CourseRepository.
//!
//! A HashMap-backed repository for tests and dry runs. All data is lost when
//! the repository is dropped.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use syllabus_core::{ChapterContent, Course, CourseLayout, CourseStatus, ImageRef, NewCourse};
use syllabus_error::{GenerationError, GenerationErrorKind, SyllabusResult};
use syllabus_interface::CourseRepository;
use tokio::sync::RwLock;

/// In-memory repository for courses.
///
/// Every operation takes the lock once, so field updates and status
/// transitions are atomic with respect to each other.
///
/// # Example
/// ```
/// use syllabus_pipeline::InMemoryCourseRepository;
///
/// # #[tokio::main]
/// # async fn main() {
/// let repo = InMemoryCourseRepository::new();
/// assert!(repo.is_empty().await);
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryCourseRepository {
    /// Courses keyed by cid
    courses: Arc<RwLock<HashMap<String, Course>>>,
}

impl InMemoryCourseRepository {
    /// Create a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored courses.
    pub async fn len(&self) -> usize {
        self.courses.read().await.len()
    }

    /// Whether no course is stored.
    pub async fn is_empty(&self) -> bool {
        self.courses.read().await.is_empty()
    }

    /// Insert or replace a course as-is.
    pub async fn insert(&self, course: Course) {
        self.courses
            .write()
            .await
            .insert(course.cid().clone(), course);
    }

    async fn update<F>(&self, cid: &str, apply: F) -> SyllabusResult<()>
    where
        F: FnOnce(&mut Course),
    {
        let mut courses = self.courses.write().await;
        let course = courses.get_mut(cid).ok_or_else(|| not_found(cid))?;
        apply(course);
        Ok(())
    }
}

#[track_caller]
fn not_found(cid: &str) -> GenerationError {
    GenerationError::new(GenerationErrorKind::CourseNotFound(cid.to_string()))
}

#[async_trait]
impl CourseRepository for InMemoryCourseRepository {
    async fn create_course(&self, new: NewCourse) -> SyllabusResult<Course> {
        let course = Course::new(new, Utc::now());
        self.insert(course.clone()).await;
        Ok(course)
    }

    async fn get_course(&self, cid: &str) -> SyllabusResult<Option<Course>> {
        Ok(self.courses.read().await.get(cid).cloned())
    }

    async fn list_courses(&self, user_email: &str) -> SyllabusResult<Vec<Course>> {
        let mut courses: Vec<Course> = self
            .courses
            .read()
            .await
            .values()
            .filter(|c| c.user_email() == user_email)
            .cloned()
            .collect();
        courses.sort_by(|a, b| b.created_at().cmp(a.created_at()));
        Ok(courses)
    }

    async fn update_layout(&self, cid: &str, layout: &CourseLayout) -> SyllabusResult<()> {
        self.update(cid, |c| c.set_layout(layout.clone())).await
    }

    async fn update_banner(&self, cid: &str, banner: Option<&ImageRef>) -> SyllabusResult<()> {
        self.update(cid, |c| c.set_banner(banner.cloned())).await
    }

    async fn update_content(&self, cid: &str, content: &[ChapterContent]) -> SyllabusResult<()> {
        self.update(cid, |c| c.set_content(content.to_vec())).await
    }

    async fn transition_status(
        &self,
        cid: &str,
        allowed_from: &[CourseStatus],
        to: CourseStatus,
    ) -> SyllabusResult<bool> {
        let mut courses = self.courses.write().await;
        let course = courses.get_mut(cid).ok_or_else(|| not_found(cid))?;
        if allowed_from.contains(course.status()) {
            course.set_status(to);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn delete_course(&self, cid: &str) -> SyllabusResult<bool> {
        Ok(self.courses.write().await.remove(cid).is_some())
    }
}
