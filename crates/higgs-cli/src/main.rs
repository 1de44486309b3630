//! Higgs CLI - command-line client for a running Higgs Audio bridge.

mod smoke;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use higgs_core::audio::from_base64;
use higgs_core::{ApiClient, GenerateRequest};

#[derive(Parser)]
#[command(name = "higgs")]
#[command(about = "Higgs Audio - talk to a running bridge server")]
#[command(version)]
struct Cli {
    /// Server base URL
    #[arg(long, env = "HIGGS_SERVER_URL", default_value = "http://localhost:8765", global = true)]
    server: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "60", global = true)]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check server health
    Health,

    /// Generate speech from text
    Generate {
        /// Text to synthesize
        #[arg(short, long)]
        text: String,

        /// Registered voice id (see `voices`)
        #[arg(short, long)]
        voice: Option<String>,

        /// Output WAV file path
        #[arg(short, long, default_value = "output.wav")]
        output: PathBuf,

        /// Temperature for sampling (server default when omitted)
        #[arg(long)]
        temperature: Option<f32>,

        /// Maximum tokens to generate (server default when omitted)
        #[arg(long)]
        max_tokens: Option<usize>,

        /// Top-p sampling (server default when omitted)
        #[arg(long)]
        top_p: Option<f32>,

        /// Force the model to emit audio
        #[arg(long)]
        force_audio_gen: bool,
    },

    /// Register a reference voice
    #[command(name = "clone")]
    CloneVoice {
        /// Reference recording (WAV)
        #[arg(short, long)]
        audio: PathBuf,

        /// Transcript of the reference recording
        #[arg(short, long)]
        text: String,

        /// Display name
        #[arg(short, long)]
        name: String,
    },

    /// List registered voices
    Voices,

    /// Show or clear chat history
    History {
        /// Clear the history instead of listing it
        #[arg(long)]
        clear: bool,
    },

    /// Run the health/voices/history/generate checks against the server
    Smoke {
        /// Where to save the generated sample
        #[arg(short, long, default_value = "test_output.wav")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let client = ApiClient::new(&cli.server, Duration::from_secs(cli.timeout))?;
    tracing::debug!(server = client.base_url(), "client ready");

    match cli.command {
        Commands::Health => {
            let health = client.health().await?;
            println!("Status: {}", health.status);
            println!("Model loaded: {}", health.model_loaded);
            println!("Timestamp: {}", health.timestamp.to_rfc3339());
        }

        Commands::Generate {
            text,
            voice,
            output,
            temperature,
            max_tokens,
            top_p,
            force_audio_gen,
        } => {
            println!("🎤 Higgs Audio - Generate");
            println!("  Text: \"{}\"", text);
            if let Some(voice) = &voice {
                println!("  Voice: {}", voice);
            }
            println!("  Output: {}", output.display());

            let request = GenerateRequest {
                text,
                voice,
                temperature,
                max_tokens,
                top_p,
                force_audio_gen,
            };

            println!("🔊 Generating speech...");
            let resp = client.generate(&request).await?;
            if !resp.success {
                bail!(
                    "generation failed: {}",
                    resp.error.unwrap_or_else(|| "unknown error".into())
                );
            }

            let wav = from_base64(&resp.audio_data)?;
            std::fs::write(&output, &wav)
                .with_context(|| format!("failed to write {}", output.display()))?;

            println!(
                "✅ Done! Generated {:.2}s of audio at {}Hz",
                resp.duration, resp.sampling_rate
            );
        }

        Commands::CloneVoice { audio, text, name } => {
            let bytes = std::fs::read(&audio)
                .with_context(|| format!("failed to read {}", audio.display()))?;
            let file_name = audio
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "reference.wav".into());

            println!("📎 Uploading {} as '{}'...", audio.display(), name);
            let resp = client.clone_voice(bytes, file_name, text, name).await?;
            match (resp.success, resp.voice_id) {
                (true, Some(id)) => println!("✅ Voice registered: {}", id),
                _ => bail!(
                    "voice cloning failed: {}",
                    resp.error.unwrap_or_else(|| "unknown error".into())
                ),
            }
        }

        Commands::Voices => {
            let voices = client.voices().await?.voices;
            if voices.is_empty() {
                println!("No voices registered.");
            }
            for id in voices {
                println!("{}", id);
            }
        }

        Commands::History { clear } => {
            if clear {
                let resp = client.clear_history().await?;
                println!("{}", resp.message);
            } else {
                let history = client.history().await?.history;
                println!("{} turn(s)", history.len());
                for turn in history {
                    println!(
                        "[{}] {:?}: {}{}",
                        turn.timestamp.to_rfc3339(),
                        turn.role,
                        turn.content.chars().take(60).collect::<String>(),
                        if turn.audio_data.is_some() { " 🔊" } else { "" }
                    );
                }
            }
        }

        Commands::Smoke { output } => {
            let report = smoke::run(&client, &output).await;
            report.print();
            if !report.all_passed() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
