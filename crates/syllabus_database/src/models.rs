//! Diesel models for the courses table.

use crate::DatabaseResult;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value as JsonValue;
use syllabus_core::{ChapterContent, Course, CourseLayout, CourseStatus, ImageRef, NewCourse};
use syllabus_error::{DatabaseError, DatabaseErrorKind};

/// Database row for the courses table.
///
/// `course_json` and `courses_content` hold the serialized layout and
/// content array; `status` holds the snake_case [`CourseStatus`].
#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = crate::schema::courses)]
#[diesel(primary_key(cid))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CourseRow {
    pub cid: String,
    pub user_email: String,
    pub name: String,
    pub description: String,
    pub level: String,
    pub category: String,
    pub number_of_chapters: i32,
    pub include_video: bool,
    pub banner_image_url: Option<String>,
    pub course_json: Option<JsonValue>,
    pub courses_content: Option<JsonValue>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for a freshly created course.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::courses)]
pub struct NewCourseRow {
    pub cid: String,
    pub user_email: String,
    pub name: String,
    pub description: String,
    pub level: String,
    pub category: String,
    pub number_of_chapters: i32,
    pub include_video: bool,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl NewCourseRow {
    /// Row for `new`, stamped with `created_at`.
    pub fn from_new_course(new: &NewCourse, created_at: DateTime<Utc>) -> Self {
        Self {
            cid: new.cid.clone(),
            user_email: new.user_email.clone(),
            name: new.name.clone(),
            description: new.description.clone(),
            level: new.level.clone(),
            category: new.category.clone(),
            number_of_chapters: i32::try_from(new.number_of_chapters).unwrap_or(i32::MAX),
            include_video: new.include_video,
            status: CourseStatus::Created.to_string(),
            created_at,
        }
    }
}

impl TryFrom<CourseRow> for Course {
    type Error = DatabaseError;

    fn try_from(row: CourseRow) -> DatabaseResult<Self> {
        let status: CourseStatus = row.status.parse().map_err(|_| {
            DatabaseError::new(DatabaseErrorKind::Serialization(format!(
                "unknown course status '{}'",
                row.status
            )))
        })?;

        let mut course = Course::new(
            NewCourse {
                cid: row.cid,
                user_email: row.user_email,
                name: row.name,
                description: row.description,
                level: row.level,
                category: row.category,
                number_of_chapters: u32::try_from(row.number_of_chapters).unwrap_or_default(),
                include_video: row.include_video,
            },
            row.created_at,
        );

        if let Some(json) = row.course_json {
            let layout: CourseLayout = serde_json::from_value(json)?;
            course.set_layout(layout);
        }
        if let Some(json) = row.courses_content {
            let content: Vec<ChapterContent> = serde_json::from_value(json)?;
            course.set_content(content);
        }
        course.set_banner(row.banner_image_url.map(ImageRef::from));
        course.set_status(status);
        Ok(course)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syllabus_core::{ChapterSkeleton, CourseBrief};

    fn row() -> CourseRow {
        CourseRow {
            cid: "c-1".into(),
            user_email: "a@b.c".into(),
            name: "Rust".into(),
            description: String::new(),
            level: "Beginner".into(),
            category: "Programming".into(),
            number_of_chapters: 2,
            include_video: true,
            banner_image_url: Some("data:image/png;base64,AAAA".into()),
            course_json: None,
            courses_content: None,
            status: "laid_out".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn row_converts_to_course() {
        let layout = CourseLayout {
            name: "Rust".into(),
            chapters: vec![ChapterSkeleton::new("Intro", ["A"])],
            ..Default::default()
        };
        let row = CourseRow {
            course_json: Some(serde_json::to_value(&layout).unwrap()),
            ..row()
        };

        let course = Course::try_from(row).unwrap();

        assert_eq!(*course.status(), CourseStatus::LaidOut);
        assert_eq!(course.course_json().as_ref(), Some(&layout));
        assert!(course.banner_image_url().as_ref().unwrap().is_inline());
        assert!(course.courses_content().is_none());
    }

    #[test]
    fn unknown_status_is_rejected() {
        let row = CourseRow {
            status: "archived".into(),
            ..row()
        };
        let err = Course::try_from(row).unwrap_err();
        assert!(matches!(err.kind, DatabaseErrorKind::Serialization(_)));
    }

    #[test]
    fn malformed_layout_is_rejected() {
        let row = CourseRow {
            course_json: Some(serde_json::json!(["not", "a", "layout"])),
            ..row()
        };
        assert!(Course::try_from(row).is_err());
    }

    #[test]
    fn new_row_starts_created() {
        let brief = CourseBrief::builder()
            .name("Rust")
            .number_of_chapters(3u32)
            .build()
            .unwrap();
        let new = NewCourse::from_brief("c-9", "a@b.c", &brief);
        let row = NewCourseRow::from_new_course(&new, Utc::now());
        assert_eq!(row.status, "created");
        assert_eq!(row.number_of_chapters, 3);
    }
}
