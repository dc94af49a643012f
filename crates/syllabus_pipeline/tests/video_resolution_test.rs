// Video discovery, verification and backfill.

mod test_utils;

use std::sync::Arc;
use syllabus_core::{ChapterSkeleton, CourseLayout, CourseStatus};
use syllabus_pipeline::{InMemoryCourseRepository, VideoResolver};
use test_utils::*;

const GOOD: &str = "aaaaaaaaaaa";
const BAD: &str = "bbbbbbbbbbb";

fn watch(id: &str) -> String {
    format!("https://www.youtube.com/watch?v={id}")
}

#[tokio::test]
async fn test_failing_probe_yields_no_video() {
    let resolver = VideoResolver::new(Arc::new(MockVideoProbe::Failing))
        .with_search(Arc::new(MockVideoSearch::new_hit(GOOD)));

    assert!(resolver.resolve_for_chapter("Ownership").await.is_none());
    assert!(resolver.verify(&watch(GOOD)).await.is_none());
}

#[tokio::test]
async fn test_resolve_for_chapter_returns_verified_video() {
    let search = Arc::new(MockVideoSearch::new_hit(GOOD));
    let resolver = VideoResolver::new(Arc::new(MockVideoProbe::Status(200)))
        .with_search(search.clone())
        .with_qualifier("tutorial");

    let video = resolver
        .resolve_for_chapter("Ownership")
        .await
        .expect("video resolved");

    assert_eq!(video.video_id, GOOD);
    assert_eq!(video.watch_url, watch(GOOD));
    assert_eq!(search.queries(), vec!["Ownership tutorial".to_string()]);
}

#[tokio::test]
async fn test_verify_returns_original_url_on_success() {
    let resolver = VideoResolver::new(Arc::new(MockVideoProbe::Status(204)));
    let url = format!("{}&t=42", watch(GOOD));

    assert_eq!(resolver.verify(&url).await, Some(url.clone()));
}

#[tokio::test]
async fn test_verify_rejects_non_success_and_unknown_links() {
    let resolver = VideoResolver::new(Arc::new(MockVideoProbe::Status(404)));
    assert!(resolver.verify(&watch(GOOD)).await.is_none());

    let resolver = VideoResolver::new(Arc::new(MockVideoProbe::Status(200)));
    assert!(resolver.verify("https://vimeo.com/123").await.is_none());
}

#[tokio::test]
async fn test_discover_without_search_is_none() {
    let resolver = VideoResolver::new(Arc::new(MockVideoProbe::Status(200)));
    assert!(!resolver.can_discover());
    assert!(resolver.discover("Ownership").await.is_none());
}

#[tokio::test]
async fn test_verify_layout_nulls_unreachable_links() {
    let resolver = VideoResolver::new(Arc::new(MockVideoProbe::Reachable(vec![GOOD.into()])));
    let mut layout = CourseLayout {
        name: "Course".into(),
        chapters: vec![
            ChapterSkeleton::new("One", ["a"]).with_video_url(watch(GOOD)),
            ChapterSkeleton::new("Two", ["b"]).with_video_url(watch(BAD)),
            ChapterSkeleton::new("Three", ["c"]),
        ],
        ..Default::default()
    };

    let removed = resolver.verify_layout(&mut layout).await;

    assert_eq!(removed, 1);
    assert_eq!(layout.chapters[0].video_url, Some(watch(GOOD)));
    assert!(layout.chapters[1].video_url.is_none());
    assert!(layout.chapters[2].video_url.is_none());
}

#[tokio::test]
async fn test_create_layout_keeps_only_verified_links() -> anyhow::Result<()> {
    let good = watch(GOOD);
    let bad = watch(BAD);
    let text = Arc::new(MockTextGenerator::new_success(layout_reply(
        "Course",
        &[("One", Some(good.as_str())), ("Two", Some(bad.as_str()))],
    )));
    let pipeline = pipeline_builder(text, Arc::new(InMemoryCourseRepository::new()))
        .video_probe(Arc::new(MockVideoProbe::Reachable(vec![GOOD.into()])))
        .build()?;

    let (course, report) = pipeline
        .create_layout_with_report(USER, &brief("Course", 2, true))
        .await?;

    let layout = course.course_json().as_ref().expect("layout stored");
    assert_eq!(layout.chapters[0].video_url, Some(good));
    assert!(layout.chapters[1].video_url.is_none());
    assert_eq!(*report.videos_removed(), 1);
    assert_eq!(*course.status(), CourseStatus::Enriched);
    Ok(())
}

#[tokio::test]
async fn test_links_dropped_without_probe() -> anyhow::Result<()> {
    let good = watch(GOOD);
    let text = Arc::new(MockTextGenerator::new_success(layout_reply(
        "Course",
        &[("One", Some(good.as_str()))],
    )));
    let pipeline = pipeline_builder(text, Arc::new(InMemoryCourseRepository::new())).build()?;

    let course = pipeline.create_layout(USER, &brief("Course", 1, true)).await?;

    let layout = course.course_json().as_ref().expect("layout stored");
    assert!(!layout.has_video_links());
    assert_eq!(*course.status(), CourseStatus::LaidOut);
    Ok(())
}

#[tokio::test]
async fn test_content_attaches_videos_when_requested() -> anyhow::Result<()> {
    let text = Arc::new(MockTextGenerator::new_routed(
        vec![
            (LAYOUT_KEY, MockResponse::Success(layout_reply("Course", &[("A", None), ("B", None)]))),
            (chapter_key("A").as_str(), MockResponse::Success(chapter_reply("A"))),
        ],
        MockResponse::Success(String::new()),
    ));
    let pipeline = pipeline_builder(text, Arc::new(InMemoryCourseRepository::new()))
        .video_probe(Arc::new(MockVideoProbe::Status(200)))
        .video_search(Arc::new(MockVideoSearch::new_hit(GOOD)))
        .build()?;

    let course = pipeline.create_layout(USER, &brief("Course", 2, true)).await?;
    let course = pipeline.generate_content(course.cid()).await?;

    let contents = course.courses_content().as_ref().expect("content stored");
    assert_eq!(
        contents[0].video.as_ref().map(|v| v.video_id.as_str()),
        Some(GOOD)
    );
    assert!(contents[1].placeholder);
    assert!(contents[1].video.is_none());
    Ok(())
}

#[tokio::test]
async fn test_content_skips_videos_when_not_requested() -> anyhow::Result<()> {
    // The canned layout reply echoes "includeVideo": true; the brief wins.
    let text = Arc::new(MockTextGenerator::new_routed(
        vec![
            (LAYOUT_KEY, MockResponse::Success(layout_reply("Course", &[("A", None)]))),
            (chapter_key("A").as_str(), MockResponse::Success(chapter_reply("A"))),
        ],
        MockResponse::Success(String::new()),
    ));
    let search = Arc::new(MockVideoSearch::new_hit(GOOD));
    let pipeline = pipeline_builder(text, Arc::new(InMemoryCourseRepository::new()))
        .video_probe(Arc::new(MockVideoProbe::Status(200)))
        .video_search(search.clone())
        .build()?;

    let course = pipeline.create_layout(USER, &brief("Course", 1, false)).await?;
    let course = pipeline.generate_content(course.cid()).await?;

    assert!(!*course.include_video());
    assert!(!course.course_json().as_ref().expect("layout stored").include_video);
    let contents = course.courses_content().as_ref().expect("content stored");
    assert!(contents[0].video.is_none());
    assert!(search.queries().is_empty());

    let course = pipeline.regenerate_chapter(course.cid(), 0).await?;
    let contents = course.courses_content().as_ref().expect("content stored");
    assert!(contents[0].video.is_none());
    assert!(search.queries().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_backfill_fills_missing_links() -> anyhow::Result<()> {
    let text = Arc::new(MockTextGenerator::new_success(layout_reply(
        "Course",
        &[("One", None), ("Two", None)],
    )));
    let search = Arc::new(MockVideoSearch::new_hit(GOOD));
    let pipeline = pipeline_builder(text, Arc::new(InMemoryCourseRepository::new()))
        .video_probe(Arc::new(MockVideoProbe::Status(200)))
        .video_search(search.clone())
        .build()?;
    let course = pipeline.create_layout(USER, &brief("Course", 2, true)).await?;
    assert!(!course.course_json().as_ref().expect("layout").has_video_links());

    let added = pipeline.backfill_videos(course.cid()).await?;

    assert_eq!(added, 2);
    let course = pipeline.get_course(course.cid()).await?.expect("course exists");
    let layout = course.course_json().as_ref().expect("layout");
    assert!(layout.chapters.iter().all(|c| c.video_url == Some(watch(GOOD))));
    assert_eq!(*course.status(), CourseStatus::Enriched);
    Ok(())
}

#[tokio::test]
async fn test_backfill_falls_back_to_course_name() -> anyhow::Result<()> {
    let text = Arc::new(MockTextGenerator::new_success(layout_reply("Course", &[("One", None)])));
    let search = Arc::new(MockVideoSearch::new_empty());
    let pipeline = pipeline_builder(text, Arc::new(InMemoryCourseRepository::new()))
        .video_probe(Arc::new(MockVideoProbe::Status(200)))
        .video_search(search.clone())
        .build()?;
    let course = pipeline.create_layout(USER, &brief("Rust Basics", 1, true)).await?;

    let added = pipeline.backfill_videos(course.cid()).await?;

    assert_eq!(added, 0);
    let queries = search.queries();
    assert_eq!(queries.len(), 2);
    assert!(queries[0].starts_with("One"));
    assert!(queries[1].starts_with(course.name().as_str()));
    Ok(())
}

#[tokio::test]
async fn test_backfill_without_search_is_noop() -> anyhow::Result<()> {
    let text = Arc::new(MockTextGenerator::new_success(layout_reply("Course", &[("One", None)])));
    let pipeline = pipeline_builder(text, Arc::new(InMemoryCourseRepository::new())).build()?;
    let course = pipeline.create_layout(USER, &brief("Course", 1, true)).await?;

    assert_eq!(pipeline.backfill_videos(course.cid()).await?, 0);
    Ok(())
}
