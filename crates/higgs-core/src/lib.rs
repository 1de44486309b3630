//! # Higgs Core
//!
//! Building blocks for an HTTP bridge in front of a Higgs Audio serve engine.
//!
//! ## Features
//!
//! - **ChatML prompts** for plain speech and reference-voice generation
//! - **Engine seam** ([`ServeEngine`]) with an HTTP-backed implementation
//! - **In-memory WAV** encoding and base64 transport
//! - **Session store** for chat history and registered voices
//! - **API client** for a running bridge server
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use higgs_core::{ApiClient, GenerateRequest};
//! use std::time::Duration;
//!
//! # async fn run() -> higgs_core::Result<()> {
//! let client = ApiClient::new("http://localhost:8765", Duration::from_secs(60))?;
//! let resp = client.generate(&GenerateRequest::new("Hello world!")).await?;
//! println!("{:.2}s of audio", resp.duration);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod audio;
pub mod chatml;
pub mod client;
pub mod config;
pub mod engine;
pub mod error;
pub mod store;

// Re-exports for convenience
pub use api::{GenerateRequest, GenerateResponse, VoiceCloneResponse};
pub use chatml::{ChatMlSample, Message, MessageContent, Role};
pub use client::ApiClient;
pub use config::{Device, GenerateDefaults, ModelConfig, ServerConfig, ServerConfigBuilder};
pub use engine::{EngineRequest, EngineResponse, HttpServeEngine, ServeEngine};
pub use error::{Error, Result};
pub use store::{ChatTurn, SessionStore, VoiceEntry};
