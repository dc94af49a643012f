//! Mock text, image and video capabilities for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use syllabus_error::{ModelError, ModelErrorKind, SyllabusResult};
use syllabus_interface::{
    ImageGenerator, ImageRequest, TextGenerator, VideoProbe, VideoSearch, VideoSearchHit,
};

/// Behavior configuration for mock responses.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub enum MockBehavior {
    /// Always return success with the given text
    Success(String),
    /// Always return the specified error
    Error(ModelErrorKind),
    /// Fail N times with the error, then succeed with the text
    FailThenSucceed {
        fail_count: usize,
        error: ModelErrorKind,
        success_text: String,
    },
    /// Return a sequence of responses (errors or success)
    Sequence(Vec<MockResponse>),
    /// Answer with the first route whose key appears in the prompt
    Routed {
        routes: Vec<(String, MockResponse)>,
        fallback: MockResponse,
    },
}

/// A single mock response (success or error).
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub enum MockResponse {
    Success(String),
    Error(ModelErrorKind),
}

impl MockResponse {
    fn into_result(self) -> SyllabusResult<String> {
        match self {
            Self::Success(text) => Ok(text),
            Self::Error(kind) => Err(ModelError::new(kind).into()),
        }
    }
}

/// Mock text model.
///
/// Tests control the replies and inspect how often the model was called.
pub struct MockTextGenerator {
    behavior: MockBehavior,
    call_count: Arc<Mutex<usize>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl MockTextGenerator {
    /// Create a mock with custom behavior.
    pub fn new_with_behavior(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            call_count: Arc::new(Mutex::new(0)),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Always succeeds with the given text.
    pub fn new_success(text: impl Into<String>) -> Self {
        Self::new_with_behavior(MockBehavior::Success(text.into()))
    }

    /// Always fails with the given error.
    pub fn new_error(error: ModelErrorKind) -> Self {
        Self::new_with_behavior(MockBehavior::Error(error))
    }

    /// Fails N times, then succeeds.
    pub fn new_fail_then_succeed(
        fail_count: usize,
        error: ModelErrorKind,
        success_text: impl Into<String>,
    ) -> Self {
        Self::new_with_behavior(MockBehavior::FailThenSucceed {
            fail_count,
            error,
            success_text: success_text.into(),
        })
    }

    /// Replies in order.
    pub fn new_sequence(responses: Vec<MockResponse>) -> Self {
        Self::new_with_behavior(MockBehavior::Sequence(responses))
    }

    /// Replies chosen by prompt content.
    pub fn new_routed(routes: Vec<(&str, MockResponse)>, fallback: MockResponse) -> Self {
        Self::new_with_behavior(MockBehavior::Routed {
            routes: routes
                .into_iter()
                .map(|(key, response)| (key.to_string(), response))
                .collect(),
            fallback,
        })
    }

    /// Number of times generate_text() was called.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Every prompt received, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    fn next_response(&self, prompt: &str) -> SyllabusResult<String> {
        let mut count = self.call_count.lock().unwrap();
        let current_count = *count;
        *count += 1;
        self.prompts.lock().unwrap().push(prompt.to_string());

        match &self.behavior {
            MockBehavior::Success(text) => Ok(text.clone()),
            MockBehavior::Error(kind) => Err(ModelError::new(kind.clone()).into()),
            MockBehavior::FailThenSucceed {
                fail_count,
                error,
                success_text,
            } => {
                if current_count < *fail_count {
                    Err(ModelError::new(error.clone()).into())
                } else {
                    Ok(success_text.clone())
                }
            }
            MockBehavior::Sequence(responses) => match responses.get(current_count) {
                Some(response) => response.clone().into_result(),
                None => Err(ModelError::new(ModelErrorKind::Request(format!(
                    "Mock sequence exhausted (call {} beyond {} responses)",
                    current_count + 1,
                    responses.len()
                )))
                .into()),
            },
            MockBehavior::Routed { routes, fallback } => routes
                .iter()
                .find(|(key, _)| prompt.contains(key.as_str()))
                .map(|(_, response)| response.clone())
                .unwrap_or_else(|| fallback.clone())
                .into_result(),
        }
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate_text(&self, prompt: &str) -> SyllabusResult<String> {
        tokio::time::sleep(tokio::time::Duration::from_millis(1)).await;
        self.next_response(prompt)
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-text"
    }
}

/// Mock image generator returning a fixed payload or failing.
pub struct MockImageGenerator {
    payload: Option<String>,
    call_count: Arc<Mutex<usize>>,
}

#[allow(dead_code)]
impl MockImageGenerator {
    /// Always returns `payload`.
    pub fn new_success(payload: impl Into<String>) -> Self {
        Self {
            payload: Some(payload.into()),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Always fails.
    pub fn new_error() -> Self {
        Self {
            payload: None,
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Number of images requested.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait]
impl ImageGenerator for MockImageGenerator {
    async fn generate_image(&self, _request: &ImageRequest) -> SyllabusResult<String> {
        *self.call_count.lock().unwrap() += 1;
        match &self.payload {
            Some(payload) => Ok(payload.clone()),
            None => Err(ModelError::new(ModelErrorKind::Unavailable("mock image".into())).into()),
        }
    }
}

/// Mock search returning one hit per query, or nothing.
pub struct MockVideoSearch {
    hits: Vec<VideoSearchHit>,
    queries: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl MockVideoSearch {
    /// Every query finds `video_id`.
    pub fn new_hit(video_id: &str) -> Self {
        Self {
            hits: vec![VideoSearchHit {
                video_id: video_id.to_string(),
                title: format!("Video {video_id}"),
                thumbnail_url: Some(format!("https://i.ytimg.com/vi/{video_id}/hqdefault.jpg")),
            }],
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every query finds nothing.
    pub fn new_empty() -> Self {
        Self {
            hits: Vec::new(),
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queries received, in call order.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl VideoSearch for MockVideoSearch {
    async fn search(&self, query: &str) -> SyllabusResult<Vec<VideoSearchHit>> {
        self.queries.lock().unwrap().push(query.to_string());
        Ok(self.hits.clone())
    }
}

/// Mock reachability probe.
pub enum MockVideoProbe {
    /// Answers every check with this status
    Status(u16),
    /// Answers 200 only for URLs containing one of these ids, 404 otherwise
    Reachable(Vec<String>),
    /// Every check errors, as on a timeout
    Failing,
}

#[async_trait]
impl VideoProbe for MockVideoProbe {
    async fn head_check(&self, url: &str) -> SyllabusResult<u16> {
        match self {
            Self::Status(status) => Ok(*status),
            Self::Reachable(ids) => Ok(if ids.iter().any(|id| url.contains(id.as_str())) {
                200
            } else {
                404
            }),
            Self::Failing => {
                Err(ModelError::new(ModelErrorKind::Request("probe timed out".into())).into())
            }
        }
    }
}
