//! Configuration types for the Higgs Audio bridge.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Default generation model repository.
pub const DEFAULT_MODEL_PATH: &str = "bosonai/higgs-audio-v2-generation-3B-base";
/// Default audio tokenizer repository.
pub const DEFAULT_AUDIO_TOKENIZER_PATH: &str = "bosonai/higgs-audio-v2-tokenizer";
/// Default listen port.
pub const DEFAULT_PORT: u16 = 8765;

/// Execution device requested from the serve engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    /// Let the engine pick (CUDA when available)
    #[default]
    Auto,
    Cuda,
    Cpu,
}

impl FromStr for Device {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Device::Auto),
            "cuda" => Ok(Device::Cuda),
            "cpu" => Ok(Device::Cpu),
            other => Err(format!("unknown device '{other}', expected auto, cuda or cpu")),
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Device::Auto => "auto",
            Device::Cuda => "cuda",
            Device::Cpu => "cpu",
        };
        f.write_str(s)
    }
}

/// Which model the serve engine should load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub model_path: String,
    pub audio_tokenizer_path: String,
    pub device: Device,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_path: DEFAULT_MODEL_PATH.to_string(),
            audio_tokenizer_path: DEFAULT_AUDIO_TOKENIZER_PATH.to_string(),
            device: Device::default(),
        }
    }
}

/// Sampling parameters applied when a request omits them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerateDefaults {
    /// Sampling temperature. Default: 0.3
    pub temperature: f32,
    /// Maximum new tokens. Default: 1024
    pub max_tokens: usize,
    /// Top-P (nucleus) sampling. Default: 0.95
    pub top_p: f32,
}

impl Default for GenerateDefaults {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            max_tokens: 1024,
            top_p: 0.95,
        }
    }
}

/// Configuration for the HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Base URL of the external serve engine (None = no model loaded)
    pub engine_url: Option<String>,
    /// Request timeout towards the engine
    pub engine_timeout: Duration,
    pub model: ModelConfig,
    pub defaults: GenerateDefaults,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            engine_url: None,
            engine_timeout: Duration::from_secs(300),
            model: ModelConfig::default(),
            defaults: GenerateDefaults::default(),
        }
    }
}

impl ServerConfig {
    /// Create a new config builder.
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// `host:port` string suitable for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Builder for ServerConfig.
#[derive(Debug, Clone, Default)]
pub struct ServerConfigBuilder {
    host: Option<String>,
    port: Option<u16>,
    engine_url: Option<String>,
    engine_timeout: Option<Duration>,
    model: Option<ModelConfig>,
    defaults: Option<GenerateDefaults>,
}

impl ServerConfigBuilder {
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Attach an external serve engine at this base URL.
    pub fn engine_url(mut self, url: impl Into<String>) -> Self {
        self.engine_url = Some(url.into());
        self
    }

    pub fn engine_timeout(mut self, timeout: Duration) -> Self {
        self.engine_timeout = Some(timeout);
        self
    }

    pub fn model(mut self, model: ModelConfig) -> Self {
        self.model = Some(model);
        self
    }

    pub fn defaults(mut self, defaults: GenerateDefaults) -> Self {
        self.defaults = Some(defaults);
        self
    }

    /// Build the config.
    pub fn build(self) -> ServerConfig {
        let base = ServerConfig::default();
        ServerConfig {
            host: self.host.unwrap_or(base.host),
            port: self.port.unwrap_or(base.port),
            engine_url: self.engine_url,
            engine_timeout: self.engine_timeout.unwrap_or(base.engine_timeout),
            model: self.model.unwrap_or_default(),
            defaults: self.defaults.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = ServerConfig::builder().build();
        assert_eq!(config.bind_addr(), "127.0.0.1:8765");
        assert!(config.engine_url.is_none());
        assert_eq!(config.model.model_path, DEFAULT_MODEL_PATH);
        assert_eq!(config.defaults.max_tokens, 1024);
    }

    #[test]
    fn test_builder_overrides() {
        let config = ServerConfig::builder()
            .host("0.0.0.0")
            .port(9000)
            .engine_url("http://engine:8000")
            .build();
        assert_eq!(config.bind_addr(), "0.0.0.0:9000");
        assert_eq!(config.engine_url.as_deref(), Some("http://engine:8000"));
    }

    #[test]
    fn test_device_parse() {
        assert_eq!("CUDA".parse::<Device>(), Ok(Device::Cuda));
        assert_eq!("cpu".parse::<Device>(), Ok(Device::Cpu));
        assert!("tpu".parse::<Device>().is_err());
        assert_eq!(Device::Auto.to_string(), "auto");
    }
}
