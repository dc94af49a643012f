//! The triggered operations: layout creation, content generation and upkeep.

use crate::{
    BannerGenerator, ChapterContentGenerator, ContentClaim, CourseAssembler, CourseEventKind,
    CourseEvents, LayoutGenerator, ModelInvoker, VideoResolver, release_stale_claim,
};
use futures::future::join_all;
use std::sync::Arc;
use syllabus_core::{
    ChapterContent, Course, CourseBrief, CourseLayout, CourseStatus, ImageRef, LayoutDefaults,
    NewCourse,
};
use syllabus_error::{ConfigError, GenerationError, GenerationErrorKind, SyllabusResult};
use syllabus_interface::{
    CourseRepository, ImageGenerator, TextGenerator, VideoProbe, VideoSearch,
};
use syllabus_rate_limit::{RateLimiter, RetryPolicy, SyllabusConfig};
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Degraded-success details of one pipeline run.
///
/// Nothing here is an error; callers use it to offer per-chapter
/// regeneration or to tell the user a banner is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, derive_getters::Getters)]
pub struct GenerationReport {
    /// Indices of chapters stored as placeholders
    placeholder_chapters: Vec<usize>,
    /// Whether the course has a banner
    banner_generated: bool,
    /// Chapter count the brief asked for
    requested_chapters: u32,
    /// Chapter count actually produced
    generated_chapters: usize,
    /// Layout video links dropped as unreachable
    videos_removed: usize,
    /// Whether the layout reply could not be parsed
    layout_unparsed: bool,
}

impl GenerationReport {
    /// The model returned a different number of chapters than requested.
    pub fn chapter_count_mismatch(&self) -> bool {
        self.generated_chapters != self.requested_chapters as usize
    }

    /// Combine this layout-stage report with the content-stage report that followed it.
    pub fn followed_by(self, content: GenerationReport) -> Self {
        Self {
            placeholder_chapters: content.placeholder_chapters,
            generated_chapters: content.generated_chapters,
            banner_generated: self.banner_generated || content.banner_generated,
            ..self
        }
    }

    /// Anything short of a complete course.
    pub fn is_degraded(&self) -> bool {
        !self.placeholder_chapters.is_empty()
            || !self.banner_generated
            || self.layout_unparsed
            || self.chapter_count_mismatch()
    }
}

/// Orchestrates the generation stages against a repository.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use syllabus_core::CourseBrief;
/// use syllabus_pipeline::{CoursePipeline, InMemoryCourseRepository};
/// # use syllabus_interface::TextGenerator;
///
/// # async fn run(text: Arc<dyn TextGenerator>) -> syllabus_error::SyllabusResult<()> {
/// let pipeline = CoursePipeline::builder()
///     .text_generator(text)
///     .repository(Arc::new(InMemoryCourseRepository::new()))
///     .build()?;
///
/// let brief = CourseBrief::builder().name("Intro to Rust").number_of_chapters(3u32).build().unwrap();
/// let course = pipeline.create_layout("dev@example.com", &brief).await?;
/// let course = pipeline.generate_content(course.cid()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CoursePipeline {
    layout: LayoutGenerator,
    banner: Option<BannerGenerator>,
    resolver: Option<VideoResolver>,
    content: ChapterContentGenerator,
    assembler: CourseAssembler,
}

impl CoursePipeline {
    /// Start building a pipeline.
    pub fn builder() -> CoursePipelineBuilder {
        CoursePipelineBuilder::default()
    }

    /// Change notifications for persisted stages.
    pub fn events(&self) -> &CourseEvents {
        self.assembler.events()
    }

    /// The persistence gate.
    pub fn assembler(&self) -> &CourseAssembler {
        &self.assembler
    }

    fn repository(&self) -> &Arc<dyn CourseRepository> {
        self.assembler.repository()
    }

    /// Load one course.
    ///
    /// # Errors
    ///
    /// Fails only if the repository fails.
    pub async fn get_course(&self, cid: &str) -> SyllabusResult<Option<Course>> {
        self.repository().get_course(cid).await
    }

    /// A user's courses, newest first.
    ///
    /// # Errors
    ///
    /// Fails only if the repository fails.
    pub async fn list_courses(&self, user_email: &str) -> SyllabusResult<Vec<Course>> {
        self.repository().list_courses(user_email).await
    }

    async fn require_course(&self, cid: &str) -> SyllabusResult<Course> {
        self.get_course(cid).await?.ok_or_else(|| {
            GenerationError::new(GenerationErrorKind::CourseNotFound(cid.to_string())).into()
        })
    }

    /// Create a course record and generate its layout, banner and verified links.
    ///
    /// # Errors
    ///
    /// See [`create_layout_with_report`](Self::create_layout_with_report).
    pub async fn create_layout(&self, user_email: &str, brief: &CourseBrief) -> SyllabusResult<Course> {
        self.create_layout_with_report(user_email, brief)
            .await
            .map(|(course, _)| course)
    }

    /// Create a course record and generate its layout, with a degradation report.
    ///
    /// The banner and link verification run concurrently once the layout
    /// exists. Neither can fail the operation.
    ///
    /// # Errors
    ///
    /// Fails on an invalid brief, a fatal layout failure or a persistence
    /// failure. When the layout cannot be produced or stored, the
    /// half-created record is removed, so no caller ever receives a cid
    /// without a layout.
    #[instrument(skip(self, brief), fields(course = %brief.name))]
    pub async fn create_layout_with_report(
        &self,
        user_email: &str,
        brief: &CourseBrief,
    ) -> SyllabusResult<(Course, GenerationReport)> {
        brief.validate()?;

        let cid = Uuid::new_v4().to_string();
        self.repository()
            .create_course(NewCourse::from_brief(&cid, user_email, brief))
            .await?;
        self.events().publish(&cid, CourseEventKind::Created);
        info!(%cid, "Course record created");

        let mut layout = match self.layout.generate(brief).await {
            Ok(layout) => layout,
            Err(e) => {
                self.remove_half_created(&cid).await;
                return Err(e);
            }
        };

        let prompt = layout.banner_image_prompt.clone();
        let (banner, videos_removed) =
            tokio::join!(self.generate_banner(&prompt), self.verify_links(&mut layout));

        if let Err(e) = self.assembler.persist_layout(&cid, &layout).await {
            self.remove_half_created(&cid).await;
            return Err(e);
        }
        self.assembler.persist_banner(&cid, banner.as_ref()).await?;
        if banner.is_some() || layout.has_video_links() {
            self.assembler.mark_enriched(&cid).await?;
        }

        let report = GenerationReport {
            placeholder_chapters: Vec::new(),
            banner_generated: banner.is_some(),
            requested_chapters: brief.number_of_chapters,
            generated_chapters: layout.chapters.len(),
            videos_removed,
            layout_unparsed: layout.is_unparsed(),
        };
        info!(%cid, chapters = layout.chapters.len(), degraded = report.is_degraded(), "Layout stage complete");
        Ok((self.require_course(&cid).await?, report))
    }

    async fn generate_banner(&self, prompt: &str) -> Option<ImageRef> {
        match &self.banner {
            Some(banner) => banner.generate(prompt).await,
            None => None,
        }
    }

    async fn verify_links(&self, layout: &mut CourseLayout) -> usize {
        match &self.resolver {
            Some(resolver) => resolver.verify_layout(layout).await,
            None => {
                // Nothing unverified is ever persisted
                let mut removed = 0;
                for chapter in layout.chapters.iter_mut() {
                    if chapter.video_url.take().is_some() {
                        removed += 1;
                    }
                }
                removed
            }
        }
    }

    async fn remove_half_created(&self, cid: &str) {
        match self.repository().delete_course(cid).await {
            Ok(_) => {
                warn!(%cid, "Removed course record after failed layout");
                self.events().publish(cid, CourseEventKind::Removed);
            }
            Err(e) => warn!(%cid, error = %e, "Failed to remove half-created course"),
        }
    }

    /// Generate and persist content for every chapter of a laid-out course.
    ///
    /// # Errors
    ///
    /// See [`generate_content_with_report`](Self::generate_content_with_report).
    pub async fn generate_content(&self, cid: &str) -> SyllabusResult<Course> {
        self.generate_content_with_report(cid)
            .await
            .map(|(course, _)| course)
    }

    /// Generate and persist content, with a degradation report.
    ///
    /// The course is claimed as `Generating` for the duration. Re-running
    /// replaces the whole content array. If this future is dropped before
    /// it completes, the claim restores the previous status.
    ///
    /// # Errors
    ///
    /// Fails with `CourseNotFound`, `LayoutMissing`, `GenerationInProgress`
    /// when another run owns the course, or a persistence error. On a
    /// persistence error the previous status is restored.
    #[instrument(skip(self))]
    pub async fn generate_content_with_report(
        &self,
        cid: &str,
    ) -> SyllabusResult<(Course, GenerationReport)> {
        let course = self.require_course(cid).await?;
        let layout = layout_of(&course)?;
        let claim = self.claim(&course).await?;

        let contents = self.content.generate_all(&layout).await;

        self.finish_content(cid, &contents, claim).await?;

        let report = GenerationReport {
            placeholder_chapters: placeholder_indices(&contents),
            banner_generated: course.banner_image_url().is_some(),
            requested_chapters: *course.number_of_chapters(),
            generated_chapters: contents.len(),
            videos_removed: 0,
            layout_unparsed: layout.is_unparsed(),
        };
        info!(
            placeholders = report.placeholder_chapters.len(),
            "Content stage complete"
        );
        Ok((self.require_course(cid).await?, report))
    }

    /// Regenerate one chapter and persist the whole content array.
    ///
    /// Chapters without stored content are filled with placeholders so the
    /// array always matches the layout.
    ///
    /// # Errors
    ///
    /// As [`generate_content`](Self::generate_content), plus
    /// `ChapterOutOfRange` for an index outside the layout.
    #[instrument(skip(self))]
    pub async fn regenerate_chapter(&self, cid: &str, index: usize) -> SyllabusResult<Course> {
        let course = self.require_course(cid).await?;
        let layout = layout_of(&course)?;
        let Some(chapter) = layout.chapters.get(index) else {
            return Err(GenerationError::new(GenerationErrorKind::ChapterOutOfRange {
                index,
                len: layout.chapters.len(),
            })
            .into());
        };
        let claim = self.claim(&course).await?;

        let stored = course.courses_content().clone().unwrap_or_default();
        let mut contents: Vec<ChapterContent> = layout
            .chapters
            .iter()
            .enumerate()
            .map(|(i, skeleton)| {
                stored
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| ChapterContent::placeholder_for(skeleton))
            })
            .collect();
        contents[index] = self
            .content
            .generate_chapter(chapter, layout.include_video)
            .await;

        self.finish_content(cid, &contents, claim).await?;
        info!(index, placeholder = contents[index].placeholder, "Chapter regenerated");
        self.require_course(cid).await
    }

    async fn claim(&self, course: &Course) -> SyllabusResult<ContentClaim> {
        let cid = course.cid();
        if let Some(claim) = ContentClaim::acquire(self.repository(), course).await? {
            return Ok(claim);
        }

        let current = self.require_course(cid).await?;
        let kind = if *current.status() == CourseStatus::Generating {
            GenerationErrorKind::GenerationInProgress(cid.clone())
        } else {
            GenerationErrorKind::LayoutMissing(cid.clone())
        };
        Err(GenerationError::new(kind).into())
    }

    async fn finish_content(
        &self,
        cid: &str,
        contents: &[ChapterContent],
        claim: ContentClaim,
    ) -> SyllabusResult<()> {
        if let Err(e) = self.assembler.persist_content(cid, contents).await {
            claim.release().await;
            return Err(e);
        }
        claim.complete(CourseStatus::Generated).await
    }

    /// Force a course out of `Generating` after a run died without releasing it.
    ///
    /// See [`release_stale_claim`](crate::release_stale_claim).
    ///
    /// # Errors
    ///
    /// Fails with `CourseNotFound` or a repository error.
    pub async fn release_claim(&self, cid: &str) -> SyllabusResult<CourseStatus> {
        release_stale_claim(self.repository().as_ref(), cid).await
    }

    /// Find videos for layout chapters that have none and persist the layout.
    ///
    /// Each chapter is searched by name, then by course name. Returns the
    /// number of chapters that gained a link; zero when discovery is not
    /// configured.
    ///
    /// # Errors
    ///
    /// Fails with `CourseNotFound`, `LayoutMissing` or a persistence error.
    #[instrument(skip(self))]
    pub async fn backfill_videos(&self, cid: &str) -> SyllabusResult<usize> {
        let course = self.require_course(cid).await?;
        let mut layout = layout_of(&course)?;

        let Some(resolver) = self.resolver.as_ref().filter(|r| r.can_discover()) else {
            warn!("Video search is not configured; nothing to backfill");
            return Ok(0);
        };

        let course_name = course.name().as_str();
        let lookups = layout.chapters.iter().map(|chapter| async move {
            if chapter.video_url.is_some() {
                return None;
            }
            match resolver.discover(&chapter.chapter_name).await {
                Some(video) => Some(video),
                None => resolver.discover(course_name).await,
            }
        });
        let found = join_all(lookups).await;

        let mut added = 0;
        for (chapter, video) in layout.chapters.iter_mut().zip(found) {
            if let Some(video) = video {
                info!(chapter = %chapter.chapter_name, url = %video.watch_url, "Video found");
                chapter.video_url = Some(video.watch_url);
                added += 1;
            }
        }

        if added > 0 {
            self.assembler.persist_layout(cid, &layout).await?;
            self.assembler.mark_enriched(cid).await?;
        }
        Ok(added)
    }
}

/// The stored layout, with video inclusion taken from the course record.
fn layout_of(course: &Course) -> SyllabusResult<CourseLayout> {
    let mut layout = course.course_json().clone().ok_or_else(|| {
        GenerationError::new(GenerationErrorKind::LayoutMissing(course.cid().clone()))
    })?;
    layout.include_video = *course.include_video();
    Ok(layout)
}

fn placeholder_indices(contents: &[ChapterContent]) -> Vec<usize> {
    contents
        .iter()
        .enumerate()
        .filter(|(_, c)| c.placeholder)
        .map(|(i, _)| i)
        .collect()
}

/// Builder for [`CoursePipeline`].
///
/// A text generator and a repository are required. Without an image
/// generator no banner is produced; without a probe, model-supplied video
/// links are dropped because they cannot be verified; without search no
/// videos are discovered.
#[derive(Default)]
pub struct CoursePipelineBuilder {
    text: Option<Arc<dyn TextGenerator>>,
    images: Option<Arc<dyn ImageGenerator>>,
    search: Option<Arc<dyn VideoSearch>>,
    probe: Option<Arc<dyn VideoProbe>>,
    repository: Option<Arc<dyn CourseRepository>>,
    events: Option<CourseEvents>,
    retry: RetryPolicy,
    limiter: Option<RateLimiter>,
    defaults: LayoutDefaults,
    qualifier: Option<String>,
    embed_base: Option<String>,
    image_size: Option<(u32, u32, String)>,
}

impl CoursePipelineBuilder {
    /// Take retry, throttling, defaults and media settings from configuration.
    pub fn config(mut self, config: &SyllabusConfig) -> Self {
        self.retry = RetryPolicy::from(config.retry);
        self.limiter = Some(RateLimiter::from_model_config(&config.model));
        self.defaults = LayoutDefaults {
            level: config.defaults.level.clone(),
            category: config.defaults.category.clone(),
            banner_prompt: config.defaults.banner_prompt.clone(),
        };
        self.qualifier = Some(config.video.qualifier.clone());
        self.embed_base = Some(config.video.embed_base.clone());
        self.image_size = Some((
            config.image.width,
            config.image.height,
            config.image.aspect_ratio.clone(),
        ));
        self
    }

    /// Text model (required).
    pub fn text_generator(mut self, text: Arc<dyn TextGenerator>) -> Self {
        self.text = Some(text);
        self
    }

    /// Banner image generator.
    pub fn image_generator(mut self, images: Arc<dyn ImageGenerator>) -> Self {
        self.images = Some(images);
        self
    }

    /// Video search for discovery.
    pub fn video_search(mut self, search: Arc<dyn VideoSearch>) -> Self {
        self.search = Some(search);
        self
    }

    /// Reachability probe for verification.
    pub fn video_probe(mut self, probe: Arc<dyn VideoProbe>) -> Self {
        self.probe = Some(probe);
        self
    }

    /// Course storage (required).
    pub fn repository(mut self, repository: Arc<dyn CourseRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Share an existing event channel.
    pub fn events(mut self, events: CourseEvents) -> Self {
        self.events = Some(events);
        self
    }

    /// Retry policy for model calls.
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry = policy;
        self
    }

    /// Throttle model calls.
    pub fn rate_limiter(mut self, limiter: RateLimiter) -> Self {
        self.limiter = Some(limiter);
        self
    }

    /// Layout fallbacks.
    pub fn layout_defaults(mut self, defaults: LayoutDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Assemble the pipeline.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` when the text generator or repository is missing.
    pub fn build(self) -> SyllabusResult<CoursePipeline> {
        let text = self
            .text
            .ok_or_else(|| ConfigError::missing("text generator"))?;
        let repository = self
            .repository
            .ok_or_else(|| ConfigError::missing("course repository"))?;

        let mut invoker = ModelInvoker::new(text, self.retry);
        if let Some(limiter) = self.limiter {
            invoker = invoker.with_limiter(limiter);
        }

        let banner = self.images.map(|images| {
            let banner = BannerGenerator::new(images);
            match &self.image_size {
                Some((width, height, ratio)) => banner.with_dimensions(*width, *height, ratio.clone()),
                None => banner,
            }
        });

        let resolver = self.probe.map(|probe| {
            let mut resolver = VideoResolver::new(probe);
            if let Some(search) = self.search {
                resolver = resolver.with_search(search);
            }
            if let Some(qualifier) = self.qualifier {
                resolver = resolver.with_qualifier(qualifier);
            }
            if let Some(embed_base) = self.embed_base {
                resolver = resolver.with_embed_base(embed_base);
            }
            resolver
        });

        let mut content = ChapterContentGenerator::new(invoker.clone());
        if let Some(resolver) = &resolver {
            content = content.with_resolver(resolver.clone());
        }

        Ok(CoursePipeline {
            layout: LayoutGenerator::new(invoker, self.defaults),
            banner,
            resolver,
            content,
            assembler: CourseAssembler::new(repository, self.events.unwrap_or_default()),
        })
    }
}
