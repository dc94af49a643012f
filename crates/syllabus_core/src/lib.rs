//! Core data types for the Syllabus course-generation pipeline.
//!
//! This crate holds the canonical shapes every stage agrees on: the
//! [`CourseBrief`] a user submits, the [`CourseLayout`] the layout stage
//! produces, per-chapter [`ChapterContent`], the [`ImageRef`] banner, and the
//! persisted [`Course`]. Model output is mapped onto these types exactly once
//! by the functions in [`ingest`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod brief;
mod content;
mod course;
mod image;
pub mod ingest;
mod layout;

pub use brief::{CourseBrief, CourseBriefBuilder, CourseBriefBuilderError};
pub use content::{
    ChapterContent, PLACEHOLDER_BODY, TopicContent, VideoRef, placeholder_fragment, watch_url_for,
};
pub use course::{Course, CourseStatus, GenerationState, NewCourse};
pub use image::{BASE64_MIN_LEN, ImageRef};
pub use ingest::{LayoutDefaults, LayoutPayload, normalize_chapter_content, normalize_layout};
pub use layout::{ChapterSkeleton, CourseLayout};
