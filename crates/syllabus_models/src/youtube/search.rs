//! YouTube search client implementing [`VideoSearch`].

use crate::youtube::SearchResponse;
use async_trait::async_trait;
use reqwest::Client;
use syllabus_error::{HttpError, ModelError, ModelErrorKind, SyllabusResult};
use syllabus_interface::{VideoSearch, VideoSearchHit};
use syllabus_rate_limit::VideoConfig;
use tracing::{debug, instrument};

/// Environment variable holding the YouTube Data API key.
pub const YOUTUBE_API_KEY_VAR: &str = "YOUTUBE_API_KEY";

/// Client for the YouTube Data API v3 `search` endpoint.
#[derive(Debug, Clone)]
pub struct YouTubeSearchClient {
    client: Client,
    api_key: String,
    endpoint: String,
    max_results: u32,
}

impl YouTubeSearchClient {
    /// Creates a client reading the key from `YOUTUBE_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not set or the HTTP client cannot be built.
    #[instrument(skip_all)]
    pub fn new(config: &VideoConfig) -> SyllabusResult<Self> {
        let api_key = std::env::var(YOUTUBE_API_KEY_VAR).map_err(|_| {
            ModelError::new(ModelErrorKind::MissingApiKey(YOUTUBE_API_KEY_VAR.to_string()))
        })?;
        Self::with_api_key(api_key, config)
    }

    /// Creates a client with an explicit key.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_api_key(api_key: impl Into<String>, config: &VideoConfig) -> SyllabusResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(HttpError::client)?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoint: config.search_endpoint.clone(),
            max_results: config.max_results.max(1),
        })
    }
}

#[async_trait]
impl VideoSearch for YouTubeSearchClient {
    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> SyllabusResult<Vec<VideoSearchHit>> {
        if query.trim().is_empty() {
            return Err(
                ModelError::new(ModelErrorKind::InvalidInput("Search query is required".into()))
                    .into(),
            );
        }

        let max_results = self.max_results.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", query),
                ("type", "video"),
                ("part", "snippet"),
                ("maxResults", max_results.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ModelError::new(ModelErrorKind::Request(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::new(ModelErrorKind::from_status(status.as_u16(), body)).into());
        }

        let parsed: SearchResponse = response.json().await.map_err(|e| {
            ModelError::new(ModelErrorKind::Request(format!(
                "Failed to parse response: {}",
                e
            )))
        })?;
        let hits = parsed.into_hits();
        debug!(count = hits.len(), "Search returned");
        Ok(hits)
    }
}
