//! Banner image generation.

use std::sync::Arc;
use syllabus_core::ImageRef;
use syllabus_interface::{ImageGenerator, ImageRequest};
use tracing::{debug, instrument, warn};

/// Produces the course banner. Never fails: any problem yields `None`.
#[derive(Clone)]
pub struct BannerGenerator {
    images: Arc<dyn ImageGenerator>,
    width: u32,
    height: u32,
    aspect_ratio: String,
}

impl BannerGenerator {
    /// Generator producing 1024x1024 images with a 16:9 aspect hint.
    pub fn new(images: Arc<dyn ImageGenerator>) -> Self {
        let defaults = ImageRequest::banner("");
        Self {
            images,
            width: defaults.width,
            height: defaults.height,
            aspect_ratio: defaults.aspect_ratio,
        }
    }

    /// Override the requested dimensions.
    pub fn with_dimensions(mut self, width: u32, height: u32, aspect_ratio: impl Into<String>) -> Self {
        self.width = width;
        self.height = height;
        self.aspect_ratio = aspect_ratio.into();
        self
    }

    /// Generate a banner for `prompt`.
    ///
    /// Inline base64 payloads become PNG data URIs; anything else is taken
    /// as a URL.
    #[instrument(skip(self, prompt))]
    pub async fn generate(&self, prompt: &str) -> Option<ImageRef> {
        let request = ImageRequest {
            prompt: prompt.to_string(),
            width: self.width,
            height: self.height,
            aspect_ratio: self.aspect_ratio.clone(),
        };
        match self.images.generate_image(&request).await {
            Ok(payload) => {
                let image = ImageRef::from_payload(&payload);
                match &image {
                    Some(image) => debug!(inline = image.is_inline(), "Banner generated"),
                    None => warn!("Image service returned an empty payload"),
                }
                image
            }
            Err(e) => {
                warn!(error = %e, "Banner generation failed");
                None
            }
        }
    }
}

impl std::fmt::Debug for BannerGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BannerGenerator")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("aspect_ratio", &self.aspect_ratio)
            .finish()
    }
}
