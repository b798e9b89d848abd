use anyhow::Context;
use axum::{body::Bytes, extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::body::{field, parse_loose_json};
use crate::errors::{AppError, OrFail};
use crate::interview::questions::{fallback_questions, QuestionRequestContext};
use crate::state::AppState;

const TRANSCRIBE_FAILED: &str = "Failed to transcribe audio";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionsRequest {
    pub job_id: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub questions: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct TranscribeResponse {
    pub transcript: String,
}

/// POST /api/interview/questions
///
/// Always answers 200. Any failure, malformed input included, is logged and
/// the fallback list is served instead.
pub async fn handle_questions(State(state): State<AppState>, body: Bytes) -> Json<QuestionsResponse> {
    let questions = match load_questions(&state, &body).await {
        Ok(questions) => questions,
        Err(e) => {
            warn!("Error generating questions, serving fallback list: {e:#}");
            fallback_questions()
        }
    };

    Json(QuestionsResponse { questions })
}

async fn load_questions(state: &AppState, body: &[u8]) -> anyhow::Result<Vec<String>> {
    let request: QuestionsRequest =
        serde_json::from_slice(body).context("question request body is not valid JSON")?;
    debug!(job_id = ?request.job_id, user_id = ?request.user_id, "Question request");

    let ctx = QuestionRequestContext {
        job_id: request.job_id,
        user_id: request.user_id,
    };
    state.questions.questions(&ctx).await
}

/// POST /api/interview/transcribe
pub async fn handle_transcribe(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<TranscribeResponse>, AppError> {
    let request = parse_loose_json(&body).or_fail(TRANSCRIBE_FAILED)?;

    let transcript = state
        .transcriber
        .transcribe(field(&request, "audioData"))
        .await
        .or_fail(TRANSCRIBE_FAILED)?;

    Ok(Json(TranscribeResponse { transcript }))
}
