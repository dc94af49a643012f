//! Course layout generation.

use crate::{ModelInvoker, extract_json, prompts};
use syllabus_core::{CourseBrief, CourseLayout, LayoutDefaults, LayoutPayload, normalize_layout};
use syllabus_error::{GenerationError, GenerationErrorKind, SyllabusResult};
use tracing::{info, instrument, warn};

/// Turns a brief into a [`CourseLayout`] with one model call.
#[derive(Debug, Clone)]
pub struct LayoutGenerator {
    invoker: ModelInvoker,
    defaults: LayoutDefaults,
}

impl LayoutGenerator {
    /// Create a generator.
    pub fn new(invoker: ModelInvoker, defaults: LayoutDefaults) -> Self {
        Self { invoker, defaults }
    }

    /// Generate the layout for `brief`.
    ///
    /// An unparsable reply is not an error: the layout keeps the reply in
    /// `raw` and has no chapters. The chapter count is whatever the model
    /// returned.
    ///
    /// # Errors
    ///
    /// Fails when the model returns no text, or the invoker fails
    /// (permanent error or retries exhausted).
    #[instrument(skip(self, brief), fields(course = %brief.name, requested = brief.number_of_chapters))]
    pub async fn generate(&self, brief: &CourseBrief) -> SyllabusResult<CourseLayout> {
        let prompt = prompts::layout_prompt(brief)?;
        let reply = self.invoker.invoke(&prompt).await?;

        if reply.trim().is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::GenerationFailed(
                "no content generated for course layout".to_string(),
            ))
            .into());
        }

        let payload = LayoutPayload::classify(extract_json(&reply), &reply);
        if matches!(payload, LayoutPayload::Unparsed(_)) {
            warn!("Layout reply was not valid JSON; keeping raw text");
        }
        let layout = normalize_layout(payload, brief, &self.defaults);

        if layout.chapters.len() != brief.number_of_chapters as usize {
            warn!(
                requested = brief.number_of_chapters,
                returned = layout.chapters.len(),
                "Chapter count differs from brief"
            );
        }
        info!(chapters = layout.chapters.len(), "Layout generated");
        Ok(layout)
    }
}
