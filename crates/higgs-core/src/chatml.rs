//! ChatML conversation types passed to the serve engine.

use serde::{Deserialize, Serialize};

/// Stop strings appended to every generation request.
pub const DEFAULT_STOP_STRINGS: [&str; 2] = ["<|end_of_text|>", "<|eot_id|>"];

const SPEECH_SYSTEM_PROMPT: &str = "Generate audio following instruction.\n\n\
<|scene_desc_start|>\nAudio is recorded from a quiet room.\n<|scene_desc_end|>";

const CLONE_SYSTEM_PROMPT: &str = "Generate audio following instruction. \
Strictly imitate the acoustic style, accent, and prosody of the voice provided in the reference audio.";

/// Speaker role of a ChatML turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// Audio payload of a message, by reference or inline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    /// Base64-encoded WAV
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_audio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MessageContent {
    Text { text: String },
    Audio(AudioContent),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: MessageContent,
}

impl Message {
    pub fn text(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            content: MessageContent::Text { text: text.into() },
        }
    }

    /// Assistant turn carrying inline base64 WAV.
    pub fn audio(role: Role, raw_audio: impl Into<String>) -> Self {
        Self {
            role,
            content: MessageContent::Audio(AudioContent {
                audio_url: None,
                raw_audio: Some(raw_audio.into()),
            }),
        }
    }
}

/// A full conversation handed to the engine in one call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatMlSample {
    pub messages: Vec<Message>,
}

impl ChatMlSample {
    /// Plain text-to-speech prompt.
    pub fn speech(text: impl Into<String>) -> Self {
        Self {
            messages: vec![
                Message::text(Role::System, SPEECH_SYSTEM_PROMPT),
                Message::text(Role::User, text),
            ],
        }
    }

    /// Prompt that conditions generation on a reference recording.
    ///
    /// The reference transcript is the user turn answered by the reference
    /// audio, so the engine continues in that voice for `text`.
    pub fn cloned(
        reference_text: impl Into<String>,
        reference_audio: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            messages: vec![
                Message::text(Role::System, CLONE_SYSTEM_PROMPT),
                Message::text(Role::User, reference_text),
                Message::audio(Role::Assistant, reference_audio),
                Message::text(Role::User, text),
            ],
        }
    }
}
