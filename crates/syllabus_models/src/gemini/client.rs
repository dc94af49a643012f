//! Gemini REST client implementing [`TextGenerator`].

use crate::gemini::{GeminiErrorBody, GeminiRequest, GeminiResponse};
use async_trait::async_trait;
use reqwest::Client;
use syllabus_error::{HttpError, ModelError, ModelErrorKind, SyllabusResult};
use syllabus_interface::TextGenerator;
use syllabus_rate_limit::ModelConfig;
use tracing::{debug, instrument, warn};

/// Environment variable holding the Gemini API key.
pub const GEMINI_API_KEY_VAR: &str = "GOOGLE_AI_API_KEY";

/// Client for Google's Gemini `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl GeminiClient {
    /// Creates a client reading the API key from `GOOGLE_AI_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not set or the HTTP client cannot be built.
    #[instrument(skip_all, fields(model = %config.name))]
    pub fn new(config: &ModelConfig) -> SyllabusResult<Self> {
        let api_key = std::env::var(GEMINI_API_KEY_VAR).map_err(|_| {
            ModelError::new(ModelErrorKind::MissingApiKey(GEMINI_API_KEY_VAR.to_string()))
        })?;
        Self::with_api_key(api_key, config)
    }

    /// Creates a client with an explicit API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_api_key(api_key: impl Into<String>, config: &ModelConfig) -> SyllabusResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(HttpError::client)?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.name.clone(),
        })
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

/// Classify a failed `generateContent` call.
///
/// The body's canonical status wins over the HTTP code, since the service
/// occasionally reports overload with a generic status.
pub fn classify_error(status: u16, body: &str) -> ModelErrorKind {
    match serde_json::from_str::<GeminiErrorBody>(body) {
        Ok(parsed) => {
            let message = parsed.error.message;
            match parsed.error.status.as_str() {
                "UNAVAILABLE" => ModelErrorKind::Unavailable(message),
                "RESOURCE_EXHAUSTED" => ModelErrorKind::RateLimited(message),
                "INVALID_ARGUMENT" => ModelErrorKind::InvalidInput(message),
                _ => ModelErrorKind::from_status(status, message),
            }
        }
        Err(_) => ModelErrorKind::from_status(status, body.to_string()),
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    async fn generate_text(&self, prompt: &str) -> SyllabusResult<String> {
        let request = GeminiRequest::from_prompt(prompt);
        debug!(url = %self.url(), "Sending Gemini request");

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ModelError::new(ModelErrorKind::Request(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let kind = classify_error(status.as_u16(), &body);
            warn!(status = status.as_u16(), error = %kind, "Gemini request failed");
            return Err(ModelError::new(kind).into());
        }

        let parsed: GeminiResponse = response.json().await.map_err(|e| {
            ModelError::new(ModelErrorKind::Request(format!(
                "Failed to parse response: {}",
                e
            )))
        })?;

        match parsed.first_text() {
            Some(text) => Ok(text),
            None => Err(ModelError::new(ModelErrorKind::EmptyResponse(self.model.clone())).into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
