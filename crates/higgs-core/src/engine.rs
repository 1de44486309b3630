//! The serve engine seam and the HTTP-backed engine shipped with the server.

use crate::chatml::{ChatMlSample, DEFAULT_STOP_STRINGS};
use crate::config::ModelConfig;
use crate::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineRequest {
    pub sample: ChatMlSample,
    pub max_new_tokens: usize,
    pub temperature: f32,
    pub top_p: f32,
    pub force_audio_gen: bool,
    pub stop_strings: Vec<String>,
}

impl EngineRequest {
    /// Request with the default stop strings.
    pub fn new(sample: ChatMlSample, max_new_tokens: usize, temperature: f32, top_p: f32) -> Self {
        Self {
            sample,
            max_new_tokens,
            temperature,
            top_p,
            force_audio_gen: false,
            stop_strings: DEFAULT_STOP_STRINGS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn force_audio_gen(mut self, force: bool) -> Self {
        self.force_audio_gen = force;
        self
    }
}

/// What the engine produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineResponse {
    /// Mono samples in [-1, 1]; None when the model emitted no audio
    #[serde(default)]
    pub audio: Option<Vec<f32>>,
    pub sampling_rate: u32,
    #[serde(default)]
    pub generated_text: String,
}

/// A pre-trained text-to-audio model the server forwards requests to.
#[async_trait]
pub trait ServeEngine: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &str;

    async fn generate(&self, request: EngineRequest) -> Result<EngineResponse>;
}

#[derive(Serialize)]
struct RemoteGenerateBody<'a> {
    #[serde(flatten)]
    model: &'a ModelConfig,
    #[serde(flatten)]
    request: &'a EngineRequest,
}

/// Engine running in a separate process, reached over HTTP.
///
/// Posts the request together with the model selection to
/// `{base_url}/generate` and expects an [`EngineResponse`] JSON body.
pub struct HttpServeEngine {
    client: reqwest::Client,
    base_url: String,
    model: ModelConfig,
}

impl HttpServeEngine {
    pub fn new(base_url: impl Into<String>, model: ModelConfig, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model,
        })
    }
}

#[async_trait]
impl ServeEngine for HttpServeEngine {
    fn name(&self) -> &str {
        &self.model.model_path
    }

    async fn generate(&self, request: EngineRequest) -> Result<EngineResponse> {
        let url = format!("{}/generate", self.base_url);
        tracing::debug!(
            url = %url,
            messages = request.sample.messages.len(),
            max_new_tokens = request.max_new_tokens,
            "forwarding generation to engine"
        );

        let body = RemoteGenerateBody {
            model: &self.model,
            request: &request,
        };
        let resp = self.client.post(&url).json(&body).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Engine {
                status: status.as_u16(),
                body,
            });
        }

        Ok(resp.json::<EngineResponse>().await?)
    }
}
