use std::sync::Arc;

use crate::config::Config;
use crate::interview::questions::QuestionSource;
use crate::interview::transcription::Transcriber;
use crate::store::Store;

/// Shared application state injected into all route handlers via Axum extractors.
/// Handlers share nothing mutable beyond what the store itself guards.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    /// Pluggable question supply. Default: FallbackQuestions.
    pub questions: Arc<dyn QuestionSource>,
    /// Pluggable speech-to-text. Default: PlaceholderTranscriber.
    pub transcriber: Arc<dyn Transcriber>,
    pub config: Config,
}
