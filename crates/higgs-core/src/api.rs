//! JSON bodies exchanged between the HTTP server and its clients.

use crate::store::ChatTurn;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
    pub timestamp: DateTime<Utc>,
}

/// Body of `POST /generate`. Omitted sampling fields use server defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(default)]
    pub force_audio_gen: bool,
}

impl GenerateRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Base64-encoded WAV
    pub audio_data: String,
    pub text: String,
    pub duration: f64,
    pub sampling_rate: u32,
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl GenerateResponse {
    pub fn failure(error: impl ToString) -> Self {
        Self {
            success: false,
            error: Some(error.to_string()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoiceCloneResponse {
    pub success: bool,
    #[serde(default)]
    pub voice_id: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl VoiceCloneResponse {
    pub fn cloned(voice_id: impl Into<String>) -> Self {
        Self {
            success: true,
            voice_id: Some(voice_id.into()),
            error: None,
        }
    }

    pub fn failure(error: impl ToString) -> Self {
        Self {
            success: false,
            voice_id: None,
            error: Some(error.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoicesResponse {
    pub voices: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub history: Vec<ChatTurn>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_minimal_body() {
        let req: GenerateRequest = serde_json::from_str(r#"{"text":"hi"}"#).unwrap();
        assert_eq!(req, GenerateRequest::new("hi"));
        assert!(!req.force_audio_gen);
    }

    #[test]
    fn test_failure_shape() {
        let json = serde_json::to_value(GenerateResponse::failure("Model not loaded")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "audio_data": "",
                "text": "",
                "duration": 0.0,
                "sampling_rate": 0,
                "success": false,
                "error": "Model not loaded",
            })
        );
    }
}
