use anyhow::{Context, Result};
use serde::Deserialize;

/// HTTP client for an external speech-to-text service. The service is a
/// black box: audio bytes in, best-effort plain-text transcript out.
#[derive(Clone)]
pub struct SpeechClient {
    base_url: String,
    model: String,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct TranscribeResponse {
    text: String,
}

impl SpeechClient {
    pub fn new(base_url: String, model: String) -> Self {
        Self {
            base_url,
            model,
            client: reqwest::Client::new(),
        }
    }

    pub fn default() -> Self {
        Self::new(
            "http://localhost:2700".to_string(),
            "vosk-model-hi-0.22".to_string(),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send raw audio bytes for transcription. The transcript comes
    /// back as-is apart from edge trimming; no punctuation or case
    /// normalization happens here or downstream.
    pub async fn transcribe(&self, audio: &[u8]) -> Result<String> {
        let url = format!("{}/transcribe?model={}", self.base_url, self.model);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/octet-stream")
            .body(audio.to_vec())
            .send()
            .await
            .context("Failed to send audio to speech service")?;

        if !response.status().is_success() {
            anyhow::bail!("Speech service request failed: {}", response.status());
        }

        let parsed: TranscribeResponse = response
            .json()
            .await
            .context("Failed to parse speech service response")?;

        Ok(parsed.text.trim().to_string())
    }
}
