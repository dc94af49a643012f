// Field-scoped persistence through CourseAssembler.

use chrono::Utc;
use std::sync::Arc;
use syllabus_core::{
    ChapterContent, ChapterSkeleton, Course, CourseBrief, CourseLayout, CourseStatus, ImageRef,
    NewCourse,
};
use syllabus_error::GenerationErrorKind;
use syllabus_interface::CourseRepository;
use syllabus_pipeline::{CourseAssembler, CourseEventKind, CourseEvents, InMemoryCourseRepository};

fn new_course(cid: &str) -> NewCourse {
    let brief = CourseBrief::builder()
        .name("Intro to X")
        .number_of_chapters(2u32)
        .build()
        .expect("valid brief");
    NewCourse::from_brief(cid, "learner@example.com", &brief)
}

fn layout() -> CourseLayout {
    CourseLayout {
        name: "Intro to X".into(),
        chapters: vec![
            ChapterSkeleton::new("A", ["a1", "a2"]),
            ChapterSkeleton::new("B", ["b1"]),
        ],
        ..Default::default()
    }
}

async fn setup() -> anyhow::Result<(Arc<InMemoryCourseRepository>, CourseAssembler)> {
    let repo = Arc::new(InMemoryCourseRepository::new());
    repo.create_course(new_course("c-1")).await?;
    let assembler = CourseAssembler::new(repo.clone(), CourseEvents::new());
    Ok((repo, assembler))
}

async fn fetch(repo: &InMemoryCourseRepository, cid: &str) -> anyhow::Result<Course> {
    repo.get_course(cid)
        .await?
        .ok_or_else(|| anyhow::anyhow!("course {cid} missing"))
}

#[tokio::test]
async fn test_persist_banner_twice_is_idempotent() -> anyhow::Result<()> {
    let (repo, assembler) = setup().await?;
    let banner = ImageRef::Url("https://cdn.example.com/b.png".into());

    assembler.persist_banner("c-1", Some(&banner)).await?;
    let once = fetch(&repo, "c-1").await?;
    assembler.persist_banner("c-1", Some(&banner)).await?;
    let twice = fetch(&repo, "c-1").await?;

    assert_eq!(once, twice);
    Ok(())
}

#[tokio::test]
async fn test_persist_layout_twice_is_idempotent() -> anyhow::Result<()> {
    let (repo, assembler) = setup().await?;

    assembler.persist_layout("c-1", &layout()).await?;
    let once = fetch(&repo, "c-1").await?;
    assembler.persist_layout("c-1", &layout()).await?;
    let twice = fetch(&repo, "c-1").await?;

    assert_eq!(once, twice);
    assert_eq!(*twice.status(), CourseStatus::LaidOut);
    Ok(())
}

#[tokio::test]
async fn test_stage_writes_touch_only_their_fields() -> anyhow::Result<()> {
    let (repo, assembler) = setup().await?;
    assembler.persist_layout("c-1", &layout()).await?;
    let contents: Vec<ChapterContent> = layout()
        .chapters
        .iter()
        .map(ChapterContent::placeholder_for)
        .collect();
    assembler.persist_content("c-1", &contents).await?;

    assembler.persist_banner("c-1", None).await?;

    let course = fetch(&repo, "c-1").await?;
    assert_eq!(course.course_json().as_ref(), Some(&layout()));
    assert_eq!(course.courses_content().as_ref(), Some(&contents));
    assert!(course.banner_image_url().is_none());
    Ok(())
}

#[tokio::test]
async fn test_content_requires_layout() -> anyhow::Result<()> {
    let (_repo, assembler) = setup().await?;

    let err = assembler.persist_content("c-1", &[]).await.unwrap_err();

    assert!(matches!(
        err.generation_kind(),
        Some(GenerationErrorKind::LayoutMissing(_))
    ));
    Ok(())
}

#[tokio::test]
async fn test_content_for_unknown_course() -> anyhow::Result<()> {
    let (_repo, assembler) = setup().await?;

    let err = assembler.persist_content("nope", &[]).await.unwrap_err();

    assert!(matches!(
        err.generation_kind(),
        Some(GenerationErrorKind::CourseNotFound(_))
    ));
    Ok(())
}

#[tokio::test]
async fn test_mark_enriched_only_from_laid_out() -> anyhow::Result<()> {
    let (repo, assembler) = setup().await?;

    assert!(!assembler.mark_enriched("c-1").await?);
    assembler.persist_layout("c-1", &layout()).await?;
    assert!(assembler.mark_enriched("c-1").await?);
    assert_eq!(*fetch(&repo, "c-1").await?.status(), CourseStatus::Enriched);
    Ok(())
}

#[tokio::test]
async fn test_writes_are_announced() -> anyhow::Result<()> {
    let (_repo, assembler) = setup().await?;
    let mut events = assembler.events().subscribe();

    assembler.persist_layout("c-1", &layout()).await?;
    assembler.persist_banner("c-1", None).await?;

    let first = events.recv().await?;
    let second = events.recv().await?;
    assert_eq!(first.kind, CourseEventKind::LayoutPersisted);
    assert_eq!(second.kind, CourseEventKind::BannerPersisted);
    assert_eq!(second.cid, "c-1");
    Ok(())
}

#[tokio::test]
async fn test_repository_status_transition_is_conditional() -> anyhow::Result<()> {
    let repo = InMemoryCourseRepository::new();
    repo.insert(Course::new(new_course("c-2"), Utc::now())).await;

    assert!(
        repo.transition_status("c-2", &[CourseStatus::Created], CourseStatus::LaidOut)
            .await?
    );
    assert!(
        !repo
            .transition_status("c-2", &[CourseStatus::Created], CourseStatus::LaidOut)
            .await?
    );
    assert!(repo.delete_course("c-2").await?);
    assert!(!repo.delete_course("c-2").await?);
    Ok(())
}
