//! Wiring configuration and environment into a pipeline.

use std::sync::Arc;
use syllabus_error::SyllabusResult;
use syllabus_interface::CourseRepository;
use syllabus_pipeline::{CoursePipelineBuilder, InMemoryCourseRepository};
use syllabus_rate_limit::SyllabusConfig;
use tracing::{info, warn};

/// A pipeline builder with every HTTP adapter `config` describes.
///
/// The text model is required. The image service and video search are
/// skipped with a warning when their API keys are missing, so the course
/// is still produced without a banner or discovered videos.
///
/// # Errors
///
/// Fails when the text model's API key is missing or an HTTP client
/// cannot be built.
#[cfg(feature = "gemini")]
pub fn pipeline_builder(config: &SyllabusConfig) -> SyllabusResult<CoursePipelineBuilder> {
    use syllabus_models::{GeminiClient, HttpVideoProbe, ImageGenClient, YouTubeSearchClient};

    let mut builder = syllabus_pipeline::CoursePipeline::builder()
        .config(config)
        .text_generator(Arc::new(GeminiClient::new(&config.model)?))
        .video_probe(Arc::new(HttpVideoProbe::new(config.video.probe_timeout())?));

    match ImageGenClient::new(&config.image) {
        Ok(client) => builder = builder.image_generator(Arc::new(client)),
        Err(e) => warn!(error = %e, "Banner generation disabled"),
    }
    match YouTubeSearchClient::new(&config.video) {
        Ok(client) => builder = builder.video_search(Arc::new(client)),
        Err(e) => warn!(error = %e, "Video discovery disabled"),
    }
    Ok(builder)
}

/// Without HTTP adapters there is no text model to build a pipeline from.
///
/// # Errors
///
/// Always returns a `ConfigError`.
#[cfg(not(feature = "gemini"))]
pub fn pipeline_builder(_config: &SyllabusConfig) -> SyllabusResult<CoursePipelineBuilder> {
    Err(syllabus_error::ConfigError::new(
        "Built without the gemini feature; rebuild with --features gemini",
    ))?
}

/// The repository commands read and write.
///
/// `dry_run` always selects the in-memory repository. Otherwise PostgreSQL
/// is used when the `database` feature is enabled.
///
/// # Errors
///
/// Fails when the database is selected but cannot be reached or migrated.
pub fn open_repository(dry_run: bool) -> SyllabusResult<Arc<dyn CourseRepository>> {
    if dry_run {
        info!("Dry run: courses are kept in memory only");
        return Ok(Arc::new(InMemoryCourseRepository::new()));
    }
    open_persistent()
}

#[cfg(feature = "database")]
fn open_persistent() -> SyllabusResult<Arc<dyn CourseRepository>> {
    let repository = syllabus_database::PostgresCourseRepository::from_env()?;
    info!("Using PostgreSQL course repository");
    Ok(Arc::new(repository))
}

#[cfg(not(feature = "database"))]
fn open_persistent() -> SyllabusResult<Arc<dyn CourseRepository>> {
    warn!("Built without the database feature; courses are kept in memory only");
    Ok(Arc::new(InMemoryCourseRepository::new()))
}
