//! Typed client for a running bridge server.

use crate::api::{
    GenerateRequest, GenerateResponse, HealthResponse, HistoryResponse, MessageResponse,
    VoiceCloneResponse, VoicesResponse,
};
use crate::{Error, Result};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client for the bridge API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp.json::<T>().await?)
    }

    pub async fn health(&self) -> Result<HealthResponse> {
        let resp = self.http.get(self.url("/health")).send().await?;
        Self::read(resp).await
    }

    pub async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
        let resp = self
            .http
            .post(self.url("/generate"))
            .json(request)
            .send()
            .await?;
        Self::read(resp).await
    }

    /// Upload a reference recording under a display name.
    pub async fn clone_voice(
        &self,
        audio: Vec<u8>,
        file_name: impl Into<String>,
        text: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<VoiceCloneResponse> {
        let part = Part::bytes(audio)
            .file_name(file_name.into())
            .mime_str("audio/wav")?;
        let form = Form::new()
            .part("audio_file", part)
            .text("text", text.into())
            .text("name", name.into());

        let resp = self
            .http
            .post(self.url("/clone-voice"))
            .multipart(form)
            .send()
            .await?;
        Self::read(resp).await
    }

    pub async fn voices(&self) -> Result<VoicesResponse> {
        let resp = self.http.get(self.url("/voices")).send().await?;
        Self::read(resp).await
    }

    pub async fn history(&self) -> Result<HistoryResponse> {
        let resp = self.http.get(self.url("/history")).send().await?;
        Self::read(resp).await
    }

    pub async fn clear_history(&self) -> Result<MessageResponse> {
        let resp = self.http.delete(self.url("/history")).send().await?;
        Self::read(resp).await
    }
}
