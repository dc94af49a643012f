//! Banner image generation over the AI Guru Lab HTTP API.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use syllabus_error::{HttpError, ModelError, ModelErrorKind, SyllabusResult};
use syllabus_interface::{ImageGenerator, ImageRequest};
use syllabus_rate_limit::ImageConfig;
use tracing::{debug, instrument};

/// Environment variable holding the image API key.
pub const IMAGE_API_KEY_VAR: &str = "AI_GURU_LAB_API";

/// Request body of the image endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageGenBody {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Prompt
    pub input: String,
    /// Image model
    pub model: String,
    /// Aspect ratio hint
    pub aspect_ratio: String,
}

/// Response body of the image endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImageGenReply {
    /// A URL or a base64 payload
    #[serde(default)]
    pub image: Option<String>,
}

/// Client for the image generation endpoint.
#[derive(Debug, Clone)]
pub struct ImageGenClient {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl ImageGenClient {
    /// Creates a client reading the key from `AI_GURU_LAB_API`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not set or the HTTP client cannot be built.
    #[instrument(skip_all)]
    pub fn new(config: &ImageConfig) -> SyllabusResult<Self> {
        let api_key = std::env::var(IMAGE_API_KEY_VAR).map_err(|_| {
            ModelError::new(ModelErrorKind::MissingApiKey(IMAGE_API_KEY_VAR.to_string()))
        })?;
        Self::with_api_key(api_key, config)
    }

    /// Creates a client with an explicit key.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_api_key(api_key: impl Into<String>, config: &ImageConfig) -> SyllabusResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(HttpError::client)?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
        })
    }

    /// The body sent for `request`.
    pub fn body(&self, request: &ImageRequest) -> ImageGenBody {
        ImageGenBody {
            width: request.width,
            height: request.height,
            input: request.prompt.clone(),
            model: self.model.clone(),
            aspect_ratio: request.aspect_ratio.clone(),
        }
    }
}

#[async_trait]
impl ImageGenerator for ImageGenClient {
    #[instrument(skip(self, request), fields(width = request.width, height = request.height))]
    async fn generate_image(&self, request: &ImageRequest) -> SyllabusResult<String> {
        debug!(endpoint = %self.endpoint, "Requesting banner image");

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .json(&self.body(request))
            .send()
            .await
            .map_err(|e| ModelError::new(ModelErrorKind::Request(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::new(ModelErrorKind::from_status(status.as_u16(), body)).into());
        }

        let reply: ImageGenReply = response.json().await.map_err(|e| {
            ModelError::new(ModelErrorKind::Request(format!(
                "Failed to parse response: {}",
                e
            )))
        })?;

        reply
            .image
            .filter(|image| !image.trim().is_empty())
            .ok_or_else(|| ModelError::new(ModelErrorKind::EmptyResponse("image".to_string())).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ImageConfig {
        ImageConfig {
            endpoint: "https://images.example.com/generate".into(),
            model: "flux".into(),
            width: 1024,
            height: 1024,
            aspect_ratio: "16:9".into(),
            timeout_secs: 10,
        }
    }

    #[test]
    fn body_uses_service_field_names() {
        let client = ImageGenClient::with_api_key("key", &config()).unwrap();
        let body = client.body(&ImageRequest::banner("a crab"));
        let value = serde_json::to_value(body).unwrap();
        assert_eq!(value["input"], "a crab");
        assert_eq!(value["aspectRatio"], "16:9");
        assert_eq!(value["model"], "flux");
    }

    #[test]
    fn reply_without_image_parses() {
        let reply: ImageGenReply = serde_json::from_str("{}").unwrap();
        assert!(reply.image.is_none());
    }
}
