pub mod client;

pub use client::SpeechClient;

use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

// Formats the field recorders hand in.
const SUPPORTED_EXTENSIONS: &[&str] = &["wav", "mp3", "aac"];

pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

/// Read an audio file and run it through the speech service.
pub async fn transcribe_file(client: &SpeechClient, path: &Path) -> Result<String> {
    if !is_supported(path) {
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        anyhow::bail!("Unsupported audio format: {}", extension);
    }

    let audio = fs::read(path)
        .await
        .context(format!("Failed to read audio file: {:?}", path))?;

    client.transcribe(&audio).await
}
