//! Acceptance checks against a live server.

use higgs_core::audio::{decode_wav, duration_secs, from_base64};
use higgs_core::{ApiClient, GenerateRequest};
use std::path::Path;

const SMOKE_TEXT: &str = "Hello, this is a test recording.";

/// Outcome of one named check.
#[derive(Debug)]
pub struct Check {
    pub name: &'static str,
    pub outcome: Result<String, String>,
}

#[derive(Debug, Default)]
pub struct Report {
    pub checks: Vec<Check>,
}

impl Report {
    fn record(&mut self, name: &'static str, outcome: Result<String, String>) {
        self.checks.push(Check { name, outcome });
    }

    pub fn passed(&self) -> usize {
        self.checks.iter().filter(|c| c.outcome.is_ok()).count()
    }

    pub fn all_passed(&self) -> bool {
        self.passed() == self.checks.len()
    }

    pub fn print(&self) {
        println!("{}", "=".repeat(40));
        for check in &self.checks {
            match &check.outcome {
                Ok(detail) => println!("✅ {}: {}", check.name, detail),
                Err(err) => println!("❌ {}: {}", check.name, err),
            }
        }
        println!("\n{}/{} checks passed", self.passed(), self.checks.len());
    }
}

/// Run health, voices, history and generate in order.
///
/// The generated audio is written to `output` and its decoded length is
/// checked against the reported duration.
pub async fn run(client: &ApiClient, output: &Path) -> Report {
    let mut report = Report::default();

    let health = client
        .health()
        .await
        .map_err(|e| e.to_string())
        .map(|h| format!("{} (model_loaded={})", h.status, h.model_loaded));
    report.record("health", health);

    let voices = client
        .voices()
        .await
        .map_err(|e| e.to_string())
        .map(|v| format!("{} voice(s)", v.voices.len()));
    report.record("voices", voices);

    let history = client
        .history()
        .await
        .map_err(|e| e.to_string())
        .map(|h| format!("{} turn(s)", h.history.len()));
    report.record("history", history);

    let generate = check_generate(client, output).await;
    report.record("generate", generate);

    report
}

async fn check_generate(client: &ApiClient, output: &Path) -> Result<String, String> {
    let request = GenerateRequest {
        max_tokens: Some(512),
        force_audio_gen: true,
        ..GenerateRequest::new(SMOKE_TEXT)
    };
    let resp = client.generate(&request).await.map_err(|e| e.to_string())?;
    if !resp.success {
        return Err(resp.error.unwrap_or_else(|| "unknown error".into()));
    }

    let wav = from_base64(&resp.audio_data).map_err(|e| e.to_string())?;
    let (samples, sample_rate) = decode_wav(&wav).map_err(|e| e.to_string())?;
    let decoded = duration_secs(samples.len(), sample_rate);
    if (decoded - resp.duration).abs() > 1e-3 {
        return Err(format!(
            "reported duration {:.3}s but decoded {:.3}s",
            resp.duration, decoded
        ));
    }

    std::fs::write(output, &wav).map_err(|e| e.to_string())?;
    Ok(format!(
        "{:.2}s at {}Hz saved to {}",
        resp.duration,
        resp.sampling_rate,
        output.display()
    ))
}
