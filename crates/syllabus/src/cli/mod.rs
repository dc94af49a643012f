//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the syllabus binary.

mod commands;

pub use commands::{Cli, Commands, OutputFormat};

use std::sync::Arc;
use syllabus::{
    Course, CourseBrief, CoursePipeline, CourseRepository, GenerationError, GenerationErrorKind,
    GenerationReport, JsonError, SyllabusConfig, SyllabusResult, open_repository,
    pipeline_builder, release_stale_claim, render_course, render_course_list, render_report,
};
use tracing::info;

/// Execute the parsed command.
pub async fn run(cli: Cli) -> SyllabusResult<()> {
    let config = match &cli.config {
        Some(path) => SyllabusConfig::from_file(path)?,
        None => SyllabusConfig::load()?,
    };
    config.validate()?;
    let repository = open_repository(cli.dry_run)?;

    match cli.command {
        Commands::Show { cid, format } => show(repository.as_ref(), &cid, format).await,
        Commands::Unlock { cid } => {
            let status = release_stale_claim(repository.as_ref(), &cid).await?;
            println!("Course {cid} is now {status}");
            Ok(())
        }
        Commands::List { user_email, format } => {
            let courses = repository.list_courses(&user_email).await?;
            match format {
                OutputFormat::Json => print_json(&courses),
                OutputFormat::Human => {
                    print!("{}", render_course_list(&courses));
                    Ok(())
                }
            }
        }
        command => {
            let pipeline = build_pipeline(&config, repository)?;
            run_pipeline_command(&pipeline, command).await
        }
    }
}

fn build_pipeline(
    config: &SyllabusConfig,
    repository: Arc<dyn CourseRepository>,
) -> SyllabusResult<CoursePipeline> {
    pipeline_builder(config)?.repository(repository).build()
}

async fn run_pipeline_command(pipeline: &CoursePipeline, command: Commands) -> SyllabusResult<()> {
    match command {
        Commands::Generate {
            name,
            description,
            category,
            level,
            chapters,
            video,
            user_email,
            content,
            format,
        } => {
            let brief = CourseBrief {
                name,
                description,
                category,
                level,
                number_of_chapters: chapters,
                include_video: video,
            };
            let (course, mut report) = pipeline.create_layout_with_report(&user_email, &brief).await?;
            info!(cid = %course.cid(), "Layout ready");

            let course = if content {
                let (course, content_report) =
                    pipeline.generate_content_with_report(course.cid()).await?;
                report = report.followed_by(content_report);
                course
            } else {
                course
            };
            emit(&course, Some(&report), format)
        }

        Commands::Content { cid, format } => {
            let (course, report) = pipeline.generate_content_with_report(&cid).await?;
            emit(&course, Some(&report), format)
        }

        Commands::Regenerate { cid, chapter } => {
            let course = pipeline.regenerate_chapter(&cid, chapter).await?;
            emit(&course, None, OutputFormat::Human)
        }

        Commands::BackfillVideos { cid } => {
            let added = pipeline.backfill_videos(&cid).await?;
            println!("Added {added} video links to course {cid}");
            Ok(())
        }

        Commands::Show { .. } | Commands::List { .. } | Commands::Unlock { .. } => Ok(()),
    }
}

async fn show(
    repository: &dyn CourseRepository,
    cid: &str,
    format: OutputFormat,
) -> SyllabusResult<()> {
    let course = repository.get_course(cid).await?.ok_or_else(|| {
        GenerationError::new(GenerationErrorKind::CourseNotFound(cid.to_string()))
    })?;
    emit(&course, None, format)
}

fn emit(course: &Course, report: Option<&GenerationReport>, format: OutputFormat) -> SyllabusResult<()> {
    match format {
        OutputFormat::Json => print_json(course),
        OutputFormat::Human => {
            print!("{}", render_course(course));
            if let Some(report) = report {
                print!("{}", render_report(report));
            }
            Ok(())
        }
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> SyllabusResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| JsonError::serialize("output", e))?;
    println!("{json}");
    Ok(())
}
