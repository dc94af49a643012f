//! The persisted composite course document.

use crate::{ChapterContent, CourseBrief, CourseLayout, ImageRef};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Stored lifecycle marker of a course.
///
/// `Generating` is the claimed in-flight state; repositories move into and
/// out of it with an atomic compare-and-set so two content runs never
/// overlap on one course.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CourseStatus {
    /// Record exists, no layout yet
    #[default]
    Created,
    /// Layout persisted
    LaidOut,
    /// Banner and/or verified video links persisted
    Enriched,
    /// Chapter content generation in flight
    Generating,
    /// Content persisted
    Generated,
}

/// Read-site classification derived from which fields are populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum GenerationState {
    /// No layout
    Created,
    /// Layout only
    LaidOut,
    /// Layout plus banner and/or video links
    Enriched,
    /// Content present
    ContentGenerated,
}

/// Fields supplied when a course record is first created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourse {
    /// Unique course identifier
    pub cid: String,
    /// Owner key
    pub user_email: String,
    /// Course title
    pub name: String,
    /// Course description
    pub description: String,
    /// Difficulty level
    pub level: String,
    /// Subject category
    pub category: String,
    /// Requested chapter count
    pub number_of_chapters: u32,
    /// Whether chapters should carry video links
    pub include_video: bool,
}

impl NewCourse {
    /// Build a creation record from a brief.
    pub fn from_brief(
        cid: impl Into<String>,
        user_email: impl Into<String>,
        brief: &CourseBrief,
    ) -> Self {
        Self {
            cid: cid.into(),
            user_email: user_email.into(),
            name: brief.name.clone(),
            description: brief.description.clone(),
            level: brief.level.clone(),
            category: brief.category.clone(),
            number_of_chapters: brief.number_of_chapters,
            include_video: brief.include_video,
        }
    }
}

/// One persisted course.
///
/// Each pipeline stage owns a disjoint set of fields: the layout stage owns
/// `course_json`, the banner stage owns `banner_image_url`, the content
/// stage owns `courses_content`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Unique course identifier
    cid: String,
    /// Owner key
    user_email: String,
    /// Course title
    name: String,
    /// Course description
    description: String,
    /// Difficulty level
    level: String,
    /// Subject category
    category: String,
    /// Requested chapter count
    number_of_chapters: u32,
    /// Whether chapters should carry video links
    include_video: bool,
    /// Banner reference, `None` when unavailable
    #[serde(rename = "bannerImageURL")]
    banner_image_url: Option<ImageRef>,
    /// Generated layout
    course_json: Option<CourseLayout>,
    /// Generated chapter content, ordered like the layout
    courses_content: Option<Vec<ChapterContent>>,
    /// Stored lifecycle marker
    status: CourseStatus,
    /// Creation time
    created_at: DateTime<Utc>,
}

impl Course {
    /// A freshly created record with no generated fields.
    pub fn new(new: NewCourse, created_at: DateTime<Utc>) -> Self {
        Self {
            cid: new.cid,
            user_email: new.user_email,
            name: new.name,
            description: new.description,
            level: new.level,
            category: new.category,
            number_of_chapters: new.number_of_chapters,
            include_video: new.include_video,
            banner_image_url: None,
            course_json: None,
            courses_content: None,
            status: CourseStatus::Created,
            created_at,
        }
    }

    /// Replace the layout.
    pub fn set_layout(&mut self, layout: CourseLayout) {
        self.course_json = Some(layout);
    }

    /// Replace the banner reference.
    pub fn set_banner(&mut self, banner: Option<ImageRef>) {
        self.banner_image_url = banner;
    }

    /// Replace the whole content array.
    pub fn set_content(&mut self, content: Vec<ChapterContent>) {
        self.courses_content = Some(content);
    }

    /// Overwrite the stored status.
    pub fn set_status(&mut self, status: CourseStatus) {
        self.status = status;
    }

    /// Derive the generation state from populated fields.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::Utc;
    /// use syllabus_core::{Course, CourseBrief, GenerationState, NewCourse};
    ///
    /// let brief = CourseBrief::builder().name("Rust").number_of_chapters(1u32).build().unwrap();
    /// let course = Course::new(NewCourse::from_brief("c-1", "a@b.c", &brief), Utc::now());
    /// assert_eq!(course.generation_state(), GenerationState::Created);
    /// assert!(!course.is_browsable());
    /// ```
    pub fn generation_state(&self) -> GenerationState {
        let Some(layout) = &self.course_json else {
            return GenerationState::Created;
        };
        if self.courses_content.as_ref().is_some_and(|c| !c.is_empty()) {
            return GenerationState::ContentGenerated;
        }
        if self.banner_image_url.is_some() || layout.has_video_links() {
            GenerationState::Enriched
        } else {
            GenerationState::LaidOut
        }
    }

    /// A course with a layout holding chapters can be browsed without content.
    pub fn is_browsable(&self) -> bool {
        self.course_json
            .as_ref()
            .is_some_and(CourseLayout::is_browsable)
    }

    /// Number of layout chapters, zero without a layout.
    pub fn chapter_count(&self) -> usize {
        self.course_json.as_ref().map_or(0, |l| l.chapters.len())
    }

    /// Indices of chapters stored as placeholders.
    pub fn placeholder_chapters(&self) -> Vec<usize> {
        self.courses_content
            .iter()
            .flatten()
            .enumerate()
            .filter(|(_, c)| c.placeholder)
            .map(|(i, _)| i)
            .collect()
    }

    /// Percentage of layout chapters marked complete, rounded to the nearest integer.
    ///
    /// `completed` maps a chapter key to its completion flag; only `true`
    /// entries count. Returns 0 for a course that is not browsable.
    pub fn progress_percent(&self, completed: &HashMap<String, bool>) -> u8 {
        let total = self.chapter_count();
        if total == 0 {
            return 0;
        }
        let done = completed.values().filter(|v| **v).count().min(total);
        ((done as f64 / total as f64) * 100.0).round() as u8
    }
}
