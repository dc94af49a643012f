//! Human-readable rendering of courses and reports.

use std::fmt::Write;
use syllabus_core::Course;
use syllabus_pipeline::GenerationReport;

/// Multi-line summary of one course: metadata, then one line per chapter.
///
/// Chapters are flagged `[video]` when they carry a link and
/// `[placeholder]` when their content failed to generate.
pub fn render_course(course: &Course) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Course: {} ({})", course.name(), course.cid());
    let _ = writeln!(
        out,
        "  Level: {}  Category: {}",
        course.level(),
        course.category()
    );
    let _ = writeln!(
        out,
        "  Status: {}  State: {}",
        course.status(),
        course.generation_state()
    );
    let banner = match course.banner_image_url() {
        Some(b) if b.is_inline() => "inline image",
        Some(_) => "linked image",
        None => "none",
    };
    let _ = writeln!(out, "  Banner: {banner}");

    let Some(layout) = course.course_json() else {
        let _ = writeln!(out, "  No layout yet");
        return out;
    };
    if layout.chapters.is_empty() {
        let _ = writeln!(out, "  Layout could not be parsed");
        return out;
    }

    let placeholders = course.placeholder_chapters();
    let content = course.courses_content().as_deref().unwrap_or_default();
    let _ = writeln!(out, "  Chapters:");
    for (i, chapter) in layout.chapters.iter().enumerate() {
        let mut flags = String::new();
        let has_video = chapter.video_url.is_some()
            || content.get(i).is_some_and(|c| c.video.is_some());
        if has_video {
            flags.push_str(" [video]");
        }
        if placeholders.contains(&i) {
            flags.push_str(" [placeholder]");
        }
        let _ = writeln!(out, "    {}. {}{}", i + 1, chapter.chapter_name, flags);
        for topic in &chapter.topics {
            let _ = writeln!(out, "       - {topic}");
        }
    }
    out
}

/// One line per course, newest first as given.
pub fn render_course_list(courses: &[Course]) -> String {
    if courses.is_empty() {
        return "No courses found\n".to_string();
    }
    let mut out = String::new();
    for course in courses {
        let _ = writeln!(
            out,
            "{}  {:<12} {:>3} ch  {}",
            course.cid(),
            course.status().as_ref(),
            course.chapter_count(),
            course.name()
        );
    }
    let _ = writeln!(out, "Total: {} courses", courses.len());
    out
}

/// Notes on what a run could not deliver; empty when nothing degraded.
pub fn render_report(report: &GenerationReport) -> String {
    let mut out = String::new();
    if *report.layout_unparsed() {
        let _ = writeln!(out, "! Layout reply could not be parsed; raw text kept");
    }
    if report.chapter_count_mismatch() {
        let _ = writeln!(
            out,
            "! Requested {} chapters, model returned {}",
            report.requested_chapters(),
            report.generated_chapters()
        );
    }
    if !*report.banner_generated() {
        let _ = writeln!(out, "! No banner image");
    }
    if *report.videos_removed() > 0 {
        let _ = writeln!(out, "! Removed {} unreachable video links", report.videos_removed());
    }
    if !report.placeholder_chapters().is_empty() {
        let chapters: Vec<String> = report
            .placeholder_chapters()
            .iter()
            .map(|i| i.to_string())
            .collect();
        let _ = writeln!(
            out,
            "! Placeholder chapters (regenerate with --chapter): {}",
            chapters.join(", ")
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use syllabus_core::{
        ChapterContent, ChapterSkeleton, CourseBrief, CourseLayout, NewCourse,
    };

    fn course() -> Course {
        let brief = CourseBrief::builder()
            .name("Rust")
            .level("Beginner")
            .category("Programming")
            .number_of_chapters(2u32)
            .build()
            .unwrap();
        Course::new(NewCourse::from_brief("c-1", "a@b.c", &brief), Utc::now())
    }

    #[test]
    fn course_without_layout() {
        let text = render_course(&course());
        assert!(text.contains("Course: Rust (c-1)"));
        assert!(text.contains("No layout yet"));
    }

    #[test]
    fn chapters_are_flagged() {
        let mut course = course();
        let layout = CourseLayout {
            name: "Rust".into(),
            chapters: vec![
                ChapterSkeleton::new("Intro", ["Setup"]).with_video_url("https://youtu.be/aaaaaaaaaaa"),
                ChapterSkeleton::new("Ownership", ["Moves"]),
            ],
            ..Default::default()
        };
        let content = vec![
            ChapterContent::placeholder_for(&layout.chapters[0]),
            ChapterContent::placeholder_for(&layout.chapters[1]),
        ];
        course.set_layout(layout);
        course.set_content(content);

        let text = render_course(&course);
        assert!(text.contains("1. Intro [video] [placeholder]"));
        assert!(text.contains("2. Ownership [placeholder]"));
        assert!(text.contains("- Moves"));
    }

    #[test]
    fn empty_list() {
        assert_eq!(render_course_list(&[]), "No courses found\n");
    }

    #[test]
    fn clean_report_renders_nothing_but_banner_note() {
        let report = GenerationReport::default();
        let text = render_report(&report);
        assert!(text.contains("No banner image"));
    }
}
