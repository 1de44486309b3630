//! Higgs Server binary.

use anyhow::Result;
use clap::Parser;
use std::time::Duration;

use higgs_core::config::{DEFAULT_AUDIO_TOKENIZER_PATH, DEFAULT_MODEL_PATH, DEFAULT_PORT};
use higgs_core::{Device, GenerateDefaults, ModelConfig, ServerConfig};

#[derive(Parser)]
#[command(name = "higgs-server")]
#[command(about = "HTTP API for the Higgs Audio serve engine")]
#[command(version)]
struct Args {
    /// Address to bind
    #[arg(long, env = "HIGGS_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Server port
    #[arg(long, env = "HIGGS_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Base URL of the external serve engine; omit to run without a model
    #[arg(long, env = "HIGGS_ENGINE_URL")]
    engine_url: Option<String>,

    /// Engine request timeout in seconds
    #[arg(long, env = "HIGGS_ENGINE_TIMEOUT_SECS", default_value_t = 300)]
    engine_timeout_secs: u64,

    /// Model path
    #[arg(long, default_value = DEFAULT_MODEL_PATH)]
    model_path: String,

    /// Audio tokenizer path
    #[arg(long, default_value = DEFAULT_AUDIO_TOKENIZER_PATH)]
    audio_tokenizer_path: String,

    /// Device to use: auto, cuda, cpu
    #[arg(long, default_value = "auto")]
    device: Device,

    /// Default maximum tokens to generate
    #[arg(long, default_value_t = 1024)]
    max_tokens: usize,

    /// Default generation temperature
    #[arg(long, default_value_t = 0.3)]
    temperature: f32,

    /// Default top-p sampling parameter
    #[arg(long, default_value_t = 0.95)]
    top_p: f32,
}

impl Args {
    fn into_config(self) -> ServerConfig {
        let mut builder = ServerConfig::builder()
            .host(self.host)
            .port(self.port)
            .engine_timeout(Duration::from_secs(self.engine_timeout_secs))
            .model(ModelConfig {
                model_path: self.model_path,
                audio_tokenizer_path: self.audio_tokenizer_path,
                device: self.device,
            })
            .defaults(GenerateDefaults {
                temperature: self.temperature,
                max_tokens: self.max_tokens,
                top_p: self.top_p,
            });
        if let Some(url) = self.engine_url {
            builder = builder.engine_url(url);
        }
        builder.build()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Args::parse().into_config();
    tracing::info!("higgs-server starting on {}", config.bind_addr());

    let engine = higgs_server::connect_engine(&config)?;
    higgs_server::serve(config, engine).await?;

    Ok(())
}
