//! Route handlers.
//!
//! Handlers that talk to the engine or parse uploads never fail at the HTTP
//! level: errors come back as `200 OK` with `success: false`.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::Json;
use chrono::Utc;

use higgs_core::api::{
    GenerateRequest, GenerateResponse, HealthResponse, HistoryResponse, MessageResponse,
    RootResponse, VoiceCloneResponse, VoicesResponse,
};
use higgs_core::audio::{decode_wav, duration_secs, encode_wav, to_base64};
use higgs_core::{ChatMlSample, ChatTurn, EngineRequest, Error, Result, Role, VoiceEntry};

use crate::state::AppState;

const LOG_PREVIEW_CHARS: usize = 100;

pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Higgs Audio API".to_string(),
        status: "running".to_string(),
    })
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        model_loaded: state.model_loaded(),
        timestamp: Utc::now(),
    })
}

pub async fn generate(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Json<GenerateResponse> {
    match run_generate(&state, req).await {
        Ok(resp) => Json(resp),
        Err(e) => {
            tracing::error!(error = %e, "audio generation failed");
            Json(GenerateResponse::failure(e))
        }
    }
}

async fn run_generate(state: &AppState, req: GenerateRequest) -> Result<GenerateResponse> {
    let engine = state.engine.as_ref().ok_or(Error::ModelNotLoaded)?;

    if req.text.trim().is_empty() {
        return Err(Error::InvalidRequest("text must not be empty".into()));
    }
    let max_tokens = req.max_tokens.unwrap_or(state.defaults.max_tokens);
    if max_tokens == 0 {
        return Err(Error::InvalidRequest("max_tokens must be > 0".into()));
    }

    let preview: String = req.text.chars().take(LOG_PREVIEW_CHARS).collect();
    tracing::info!(engine = engine.name(), voice = ?req.voice, "generating audio for: {preview}");

    let sample = match req.voice.as_deref().filter(|v| !v.is_empty()) {
        Some(voice_id) => {
            let store = state.store.read().await;
            let voice = store
                .voice(voice_id)
                .ok_or_else(|| Error::VoiceNotFound(voice_id.to_string()))?;
            ChatMlSample::cloned(&voice.reference_text, &voice.reference_audio, &req.text)
        }
        None => ChatMlSample::speech(&req.text),
    };

    let request = EngineRequest::new(
        sample,
        max_tokens,
        req.temperature.unwrap_or(state.defaults.temperature),
        req.top_p.unwrap_or(state.defaults.top_p),
    )
    .force_audio_gen(req.force_audio_gen);

    let resp = engine.generate(request).await?;
    let audio = resp.audio.ok_or(Error::GenerationFailed)?;

    let audio_data = to_base64(&encode_wav(&audio, resp.sampling_rate)?);
    let duration = duration_secs(audio.len(), resp.sampling_rate);

    state.store.write().await.push_turn(ChatTurn::new(
        Role::Assistant,
        req.text,
        Some(audio_data.clone()),
    ));

    tracing::info!(duration, sampling_rate = resp.sampling_rate, "audio generated");

    Ok(GenerateResponse {
        audio_data,
        text: resp.generated_text,
        duration,
        sampling_rate: resp.sampling_rate,
        success: true,
        error: None,
    })
}

pub async fn clone_voice(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Json<VoiceCloneResponse> {
    let result = match multipart {
        Ok(multipart) => run_clone_voice(&state, multipart).await,
        Err(rejection) => Err(Error::InvalidRequest(rejection.body_text())),
    };

    match result {
        Ok(voice_id) => Json(VoiceCloneResponse::cloned(voice_id)),
        Err(e) => {
            tracing::error!(error = %e, "voice cloning failed");
            Json(VoiceCloneResponse::failure(e))
        }
    }
}

async fn run_clone_voice(state: &AppState, mut multipart: Multipart) -> Result<String> {
    let mut audio: Option<Vec<u8>> = None;
    let mut text: Option<String> = None;
    let mut name: Option<String> = None;

    let invalid = |e: axum::extract::multipart::MultipartError| Error::InvalidRequest(e.body_text());

    while let Some(field) = multipart.next_field().await.map_err(invalid)? {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "audio_file" | "audioFile" => {
                audio = Some(field.bytes().await.map_err(invalid)?.to_vec());
            }
            "text" => {
                text = Some(field.text().await.map_err(invalid)?);
            }
            "name" => {
                name = Some(field.text().await.map_err(invalid)?);
            }
            _ => {}
        }
    }

    let audio = audio.ok_or_else(|| Error::InvalidRequest("missing 'audio_file' field".into()))?;
    let text = text.ok_or_else(|| Error::InvalidRequest("missing 'text' field".into()))?;
    let name = name.ok_or_else(|| Error::InvalidRequest("missing 'name' field".into()))?;

    // Any container is accepted; the engine decides what it can read.
    match decode_wav(&audio) {
        Ok((samples, sample_rate)) => tracing::debug!(
            seconds = duration_secs(samples.len(), sample_rate),
            sample_rate,
            "reference audio decoded"
        ),
        Err(_) => tracing::debug!(bytes = audio.len(), "reference audio is not WAV; stored as-is"),
    }

    let voice_id = state.store.write().await.register_voice(VoiceEntry {
        name: name.clone(),
        reference_text: text,
        reference_audio: to_base64(&audio),
    });

    tracing::info!("voice cloned: {name} -> {voice_id}");
    Ok(voice_id)
}

pub async fn list_voices(State(state): State<AppState>) -> Json<VoicesResponse> {
    let store = state.store.read().await;
    Json(VoicesResponse {
        voices: store.voice_ids(),
    })
}

pub async fn get_history(State(state): State<AppState>) -> Json<HistoryResponse> {
    let store = state.store.read().await;
    Json(HistoryResponse {
        history: store.history().to_vec(),
    })
}

pub async fn clear_history(State(state): State<AppState>) -> Json<MessageResponse> {
    let removed = state.store.write().await.clear_history();
    tracing::info!(removed, "history cleared");
    Json(MessageResponse {
        message: "History cleared".to_string(),
    })
}
