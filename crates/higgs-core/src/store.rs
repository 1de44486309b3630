//! Per-process chat history and voice library.

use crate::chatml::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One recorded conversation turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
    /// Base64 WAV produced for this turn, if any
    #[serde(default)]
    pub audio_data: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl ChatTurn {
    pub fn new(role: Role, content: impl Into<String>, audio_data: Option<String>) -> Self {
        Self {
            role,
            content: content.into(),
            audio_data,
            timestamp: Utc::now(),
        }
    }
}

/// A registered reference voice.
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceEntry {
    pub name: String,
    /// Transcript of the reference recording
    pub reference_text: String,
    /// Base64 WAV of the reference recording
    pub reference_audio: String,
}

/// In-memory state shared by all requests.
///
/// Nothing is persisted and nothing is evicted. Voice ids come from a
/// counter that only grows, so an id is never handed out twice.
#[derive(Debug, Default)]
pub struct SessionStore {
    history: Vec<ChatTurn>,
    voices: BTreeMap<u64, (String, VoiceEntry)>,
    next_voice: u64,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_turn(&mut self, turn: ChatTurn) {
        self.history.push(turn);
    }

    /// Turns in the order they were recorded.
    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }

    /// Drop all turns, returning how many were removed.
    pub fn clear_history(&mut self) -> usize {
        let removed = self.history.len();
        self.history.clear();
        removed
    }

    /// Store a voice and return its freshly issued id (`voice_1`, `voice_2`, ...).
    pub fn register_voice(&mut self, entry: VoiceEntry) -> String {
        self.next_voice += 1;
        let id = format!("voice_{}", self.next_voice);
        self.voices.insert(self.next_voice, (id.clone(), entry));
        id
    }

    pub fn voice(&self, id: &str) -> Option<&VoiceEntry> {
        let n = id.strip_prefix("voice_")?.parse::<u64>().ok()?;
        self.voices
            .get(&n)
            .filter(|(stored, _)| stored == id)
            .map(|(_, entry)| entry)
    }

    /// Voice ids in issue order.
    pub fn voice_ids(&self) -> Vec<String> {
        self.voices.values().map(|(id, _)| id.clone()).collect()
    }
}
