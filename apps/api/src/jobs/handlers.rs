use axum::{body::Bytes, extract::State, Json};
use tracing::debug;

use crate::body::{field, parse_loose_json};
use crate::errors::{AppError, OrFail};
use crate::models::job::JobDescription;
use crate::state::AppState;

const FETCH_JOBS_FAILED: &str = "Failed to fetch jobs";

/// Number of job descriptions returned per match request.
pub const MATCH_LIMIT: i64 = 5;

/// POST /api/jobs/match
///
/// Returns the `MATCH_LIMIT` most recently created job descriptions, newest
/// first. No ranking against the user's resume takes place, and `userId` is
/// read only for the log line.
pub async fn handle_match_jobs(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Vec<JobDescription>>, AppError> {
    let request = parse_loose_json(&body).or_fail(FETCH_JOBS_FAILED)?;
    debug!(user_id = ?field(&request, "userId"), "Job match request");

    let jobs = state
        .store
        .latest_jobs(MATCH_LIMIT)
        .await
        .or_fail(FETCH_JOBS_FAILED)?;

    Ok(Json(jobs))
}
