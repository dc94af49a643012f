// Facade wiring: dry-run repository, re-exports and rendering.

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use syllabus::{
    CourseBrief, CoursePipeline, RetryPolicy, SyllabusResult, TextGenerator, open_repository,
    render_course, render_course_list,
};

/// Replies with a two-chapter layout, then chapter content.
struct ScriptedModel {
    calls: AtomicUsize,
}

#[async_trait]
impl TextGenerator for ScriptedModel {
    async fn generate_text(&self, prompt: &str) -> SyllabusResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if prompt.contains("Generate a Learning Course") {
            return Ok(r#"Here you go:
```json
{"course": {"name": "Intro to X", "chapters": [
  {"chapterName": "Basics", "topics": ["What", "Why"]},
  {"chapterName": "Practice", "topics": ["How"]}
]}}
```"#
                .to_string());
        }
        Ok(r#"{"topics": [{"topic": "What", "content": "<h2>What</h2><p>X</p>"}]}"#.to_string())
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-1"
    }
}

#[tokio::test]
async fn test_dry_run_generates_full_course() -> anyhow::Result<()> {
    let model = Arc::new(ScriptedModel {
        calls: AtomicUsize::new(0),
    });
    let pipeline = CoursePipeline::builder()
        .text_generator(model.clone())
        .repository(open_repository(true)?)
        .retry_policy(RetryPolicy::new(2, Duration::from_millis(1)))
        .build()?;

    let brief = CourseBrief::builder()
        .name("Intro to X")
        .number_of_chapters(2u32)
        .build()?;
    let course = pipeline.create_layout("me@example.com", &brief).await?;
    let course = pipeline.generate_content(course.cid()).await?;

    assert_eq!(model.calls.load(Ordering::SeqCst), 3);
    assert_eq!(course.chapter_count(), 2);
    assert!(course.placeholder_chapters().is_empty());

    let text = render_course(&course);
    assert!(text.contains("1. Basics"));
    assert!(text.contains("2. Practice"));

    let listed = pipeline.list_courses("me@example.com").await?;
    assert!(render_course_list(&listed).contains("Total: 1 courses"));
    Ok(())
}
