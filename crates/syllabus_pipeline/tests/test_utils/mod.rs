//! Test utilities for pipeline tests.
//!
//! This module provides mock capabilities and canned model replies.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;
use syllabus_core::CourseBrief;
use syllabus_pipeline::{CoursePipeline, CoursePipelineBuilder, InMemoryCourseRepository};
use syllabus_rate_limit::RetryPolicy;

pub mod mock_capabilities;

#[allow(unused_imports)]
pub use mock_capabilities::{
    MockBehavior, MockImageGenerator, MockResponse, MockTextGenerator, MockVideoProbe,
    MockVideoSearch,
};

/// Phrase that only appears in layout prompts.
pub const LAYOUT_KEY: &str = "Generate a Learning Course";

pub const USER: &str = "learner@example.com";

/// Route key matching the chapter prompt for `name`.
pub fn chapter_key(name: &str) -> String {
    format!("for the chapter: \"{name}\"")
}

/// A brief for `chapters` chapters.
pub fn brief(name: &str, chapters: u32, include_video: bool) -> CourseBrief {
    CourseBrief::builder()
        .name(name)
        .description("A short course")
        .level("Beginner")
        .category("Programming")
        .number_of_chapters(chapters)
        .include_video(include_video)
        .build()
        .expect("Failed to build test brief")
}

/// A wrapped layout reply with the given chapters and optional video links.
pub fn layout_reply(name: &str, chapters: &[(&str, Option<&str>)]) -> String {
    let chapters: Vec<serde_json::Value> = chapters
        .iter()
        .map(|(chapter, video)| {
            serde_json::json!({
                "chapterName": chapter,
                "topics": ["First topic", "Second topic"],
                "videoUrl": video.unwrap_or(""),
            })
        })
        .collect();
    let body = serde_json::json!({
        "course": {
            "name": name,
            "description": "Generated description",
            "category": "Programming",
            "level": "Beginner",
            "includeVideo": true,
            "noOfChapters": chapters.len(),
            "bannerImagePrompt": "A flat illustration",
            "chapters": chapters,
        }
    });
    format!("```json\n{body}\n```")
}

/// A chapter reply for `name` with two topics.
pub fn chapter_reply(name: &str) -> String {
    serde_json::json!({
        "chapterName": name,
        "topics": [
            {"topic": "First topic", "content": format!("<h2>{name} one</h2><p>Body</p>")},
            {"topic": "Second topic", "content": format!("<h2>{name} two</h2><p>Body</p>")},
        ]
    })
    .to_string()
}

/// Retries without real waiting.
pub fn fast_retry(max_retries: usize) -> RetryPolicy {
    RetryPolicy::new(max_retries, Duration::from_millis(1))
}

/// Builder preloaded with `text`, a fresh repository and fast retries.
pub fn pipeline_builder(
    text: Arc<MockTextGenerator>,
    repo: Arc<InMemoryCourseRepository>,
) -> CoursePipelineBuilder {
    CoursePipeline::builder()
        .text_generator(text)
        .repository(repo)
        .retry_policy(fast_retry(3))
}
