//! HEAD-request reachability probe.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use syllabus_error::{HttpError, SyllabusResult};
use syllabus_interface::VideoProbe;
use tracing::{debug, instrument};

/// Probe that issues a HEAD request with a bounded timeout.
#[derive(Debug, Clone)]
pub struct HttpVideoProbe {
    client: Client,
}

impl HttpVideoProbe {
    /// Creates a probe with the given timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> SyllabusResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(HttpError::client)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl VideoProbe for HttpVideoProbe {
    #[instrument(skip(self))]
    async fn head_check(&self, url: &str) -> SyllabusResult<u16> {
        let response = self
            .client
            .head(url)
            .send()
            .await
            .map_err(|e| HttpError::request(format!("HEAD {url}"), e))?;
        let status = response.status().as_u16();
        debug!(status, "Probe answered");
        Ok(status)
    }
}
