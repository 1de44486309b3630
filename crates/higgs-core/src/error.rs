//! Error types for the Higgs Audio bridge.

use thiserror::Error;

/// Result type alias using the bridge Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Bridge error types.
#[derive(Error, Debug)]
pub enum Error {
    /// No serve engine is attached to the server
    #[error("Model not loaded")]
    ModelNotLoaded,

    /// The engine answered without audio
    #[error("Failed to generate audio")]
    GenerationFailed,

    /// Voice id not present in the voice library
    #[error("Voice '{0}' not found. Register it first via /clone-voice")]
    VoiceNotFound(String),

    /// Missing or malformed request field
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Audio encode/decode error
    #[error("Audio error: {0}")]
    Audio(String),

    /// External engine returned a non-success status
    #[error("Engine error ({status}): {body}")]
    Engine { status: u16, body: String },

    /// Bridge server returned a non-success status
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// Transport error talking to the engine or the API
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid base64 payload
    #[error("Base64 error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<hound::Error> for Error {
    fn from(err: hound::Error) -> Self {
        Error::Audio(err.to_string())
    }
}
