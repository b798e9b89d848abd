//! Interview question supply.
//!
//! `AppState` holds an `Arc<dyn QuestionSource>`. The default,
//! `FallbackQuestions`, serves the static list for every job and user.

use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

/// The static list served whenever no better questions are available.
pub const FALLBACK_QUESTIONS: [&str; 10] = [
    "Tell me about yourself",
    "Why are you interested in this position?",
    "What are your greatest strengths?",
    "What are your weaknesses?",
    "Where do you see yourself in 5 years?",
    "Why should we hire you?",
    "Describe a challenging situation you faced and how you handled it",
    "What motivates you?",
    "How do you handle stress and pressure?",
    "Do you have any questions for us?",
];

pub fn fallback_questions() -> Vec<String> {
    FALLBACK_QUESTIONS.iter().map(|q| q.to_string()).collect()
}

/// Identifiers the client sends along with a question request.
/// Neither is validated against the store.
#[derive(Debug, Clone, Default)]
pub struct QuestionRequestContext {
    pub job_id: Option<String>,
    pub user_id: Option<String>,
}

#[async_trait]
pub trait QuestionSource: Send + Sync {
    async fn questions(&self, ctx: &QuestionRequestContext) -> Result<Vec<String>>;
}

/// Serves `FALLBACK_QUESTIONS` regardless of the request context.
pub struct FallbackQuestions;

#[async_trait]
impl QuestionSource for FallbackQuestions {
    async fn questions(&self, ctx: &QuestionRequestContext) -> Result<Vec<String>> {
        debug!(
            job_id = ctx.job_id.as_deref().unwrap_or("<none>"),
            user_id = ctx.user_id.as_deref().unwrap_or("<none>"),
            "Serving fallback questions"
        );
        Ok(fallback_questions())
    }
}
