//! CourseRepository trait implementation.
//!
//! Provides the PostgreSQL-backed implementation of the CourseRepository
//! trait. Every stage writes only its own column.

use crate::schema::courses::dsl;
use crate::{CourseRow, DatabaseResult, NewCourseRow, PgPool, establish_pool, run_migrations};
use async_trait::async_trait;
use chrono::Utc;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use syllabus_core::{ChapterContent, Course, CourseLayout, CourseStatus, ImageRef, NewCourse};
use syllabus_error::{
    DatabaseError, DatabaseErrorKind, GenerationError, GenerationErrorKind, SyllabusResult,
};
use syllabus_interface::CourseRepository;
use tracing::{debug, instrument};

/// Database-backed course repository.
///
/// Diesel calls are blocking, so each operation checks a connection out of
/// the pool inside `spawn_blocking`.
///
/// # Example
/// ```no_run
/// use syllabus_database::PostgresCourseRepository;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let repo = PostgresCourseRepository::from_env()?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PostgresCourseRepository {
    pool: PgPool,
}

impl PostgresCourseRepository {
    /// Create a repository over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect through `DATABASE_URL` and apply pending migrations.
    ///
    /// # Errors
    ///
    /// Fails if the pool cannot be built or a migration fails.
    pub fn from_env() -> DatabaseResult<Self> {
        let pool = establish_pool()?;
        let mut conn = pool
            .get()
            .map_err(|e| DatabaseError::new(DatabaseErrorKind::Connection(e.to_string())))?;
        run_migrations(&mut conn)?;
        Ok(Self::new(pool))
    }

    async fn with_conn<T, F>(&self, op: F) -> SyllabusResult<T>
    where
        F: FnOnce(&mut PgConnection) -> DatabaseResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        let result = tokio::task::spawn_blocking(move || {
            let mut conn = pool
                .get()
                .map_err(|e| DatabaseError::new(DatabaseErrorKind::Connection(e.to_string())))?;
            op(&mut conn)
        })
        .await
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Task(e.to_string())))?;
        Ok(result?)
    }
}

impl std::fmt::Debug for PostgresCourseRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresCourseRepository")
            .field("connections", &self.pool.state().connections)
            .finish()
    }
}

#[track_caller]
fn require_row(cid: &str, affected: usize) -> SyllabusResult<()> {
    if affected == 0 {
        return Err(GenerationError::new(GenerationErrorKind::CourseNotFound(cid.to_string())).into());
    }
    Ok(())
}

#[async_trait]
impl CourseRepository for PostgresCourseRepository {
    #[instrument(skip(self, new), fields(cid = %new.cid))]
    async fn create_course(&self, new: NewCourse) -> SyllabusResult<Course> {
        let row = NewCourseRow::from_new_course(&new, Utc::now());
        let stored = self
            .with_conn(move |conn| {
                Ok(diesel::insert_into(dsl::courses)
                    .values(&row)
                    .returning(CourseRow::as_returning())
                    .get_result(conn)?)
            })
            .await?;
        debug!("Course row inserted");
        Ok(Course::try_from(stored)?)
    }

    async fn get_course(&self, cid: &str) -> SyllabusResult<Option<Course>> {
        let key = cid.to_string();
        let row = self
            .with_conn(move |conn| {
                Ok(dsl::courses
                    .find(key)
                    .select(CourseRow::as_select())
                    .first(conn)
                    .optional()?)
            })
            .await?;
        Ok(row.map(Course::try_from).transpose()?)
    }

    async fn list_courses(&self, user_email: &str) -> SyllabusResult<Vec<Course>> {
        let owner = user_email.to_string();
        let rows = self
            .with_conn(move |conn| {
                Ok(dsl::courses
                    .filter(dsl::user_email.eq(owner))
                    .order(dsl::created_at.desc())
                    .select(CourseRow::as_select())
                    .load(conn)?)
            })
            .await?;
        let courses = rows
            .into_iter()
            .map(Course::try_from)
            .collect::<DatabaseResult<Vec<_>>>()?;
        Ok(courses)
    }

    #[instrument(skip(self, layout))]
    async fn update_layout(&self, cid: &str, layout: &CourseLayout) -> SyllabusResult<()> {
        let key = cid.to_string();
        let value = serde_json::to_value(layout).map_err(DatabaseError::from)?;
        let affected = self
            .with_conn(move |conn| {
                Ok(diesel::update(dsl::courses.find(key))
                    .set(dsl::course_json.eq(Some(value)))
                    .execute(conn)?)
            })
            .await?;
        require_row(cid, affected)
    }

    #[instrument(skip(self, banner))]
    async fn update_banner(&self, cid: &str, banner: Option<&ImageRef>) -> SyllabusResult<()> {
        let key = cid.to_string();
        let value = banner.map(|b| b.as_str().to_string());
        let affected = self
            .with_conn(move |conn| {
                Ok(diesel::update(dsl::courses.find(key))
                    .set(dsl::banner_image_url.eq(value))
                    .execute(conn)?)
            })
            .await?;
        require_row(cid, affected)
    }

    #[instrument(skip(self, content), fields(chapters = content.len()))]
    async fn update_content(&self, cid: &str, content: &[ChapterContent]) -> SyllabusResult<()> {
        let key = cid.to_string();
        let value = serde_json::to_value(content).map_err(DatabaseError::from)?;
        let affected = self
            .with_conn(move |conn| {
                Ok(diesel::update(dsl::courses.find(key))
                    .set(dsl::courses_content.eq(Some(value)))
                    .execute(conn)?)
            })
            .await?;
        require_row(cid, affected)
    }

    #[instrument(skip(self))]
    async fn transition_status(
        &self,
        cid: &str,
        allowed_from: &[CourseStatus],
        to: CourseStatus,
    ) -> SyllabusResult<bool> {
        let key = cid.to_string();
        let from: Vec<String> = allowed_from.iter().map(ToString::to_string).collect();
        let target = to.to_string();
        let outcome = self
            .with_conn(move |conn| {
                let updated = diesel::update(
                    dsl::courses
                        .filter(dsl::cid.eq(&key))
                        .filter(dsl::status.eq_any(from)),
                )
                .set(dsl::status.eq(target))
                .execute(conn)?;
                if updated > 0 {
                    return Ok(Some(true));
                }
                let exists = dsl::courses
                    .find(&key)
                    .select(dsl::cid)
                    .first::<String>(conn)
                    .optional()?
                    .is_some();
                Ok(exists.then_some(false))
            })
            .await?;

        match outcome {
            Some(moved) => Ok(moved),
            None => Err(GenerationError::new(GenerationErrorKind::CourseNotFound(cid.to_string())).into()),
        }
    }

    #[instrument(skip(self))]
    async fn delete_course(&self, cid: &str) -> SyllabusResult<bool> {
        let key = cid.to_string();
        let deleted = self
            .with_conn(move |conn| Ok(diesel::delete(dsl::courses.find(key)).execute(conn)?))
            .await?;
        Ok(deleted > 0)
    }
}
