use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

pub const PLACEHOLDER_TRANSCRIPT: &str = "User's answer here (transcription pending)";

/// Speech-to-text backend. The payload is whatever the client sent as
/// `audioData`, passed through untouched.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio_data: Option<&Value>) -> Result<String>;
}

/// Returns `PLACEHOLDER_TRANSCRIPT` for any payload.
pub struct PlaceholderTranscriber;

#[async_trait]
impl Transcriber for PlaceholderTranscriber {
    async fn transcribe(&self, _audio_data: Option<&Value>) -> Result<String> {
        Ok(PLACEHOLDER_TRANSCRIPT.to_string())
    }
}
