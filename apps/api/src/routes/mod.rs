pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::interview::handlers::{handle_questions, handle_transcribe};
use crate::jobs::handlers::handle_match_jobs;
use crate::resume::handlers::handle_upload_resume;
use crate::state::AppState;
use crate::users::handlers::handle_create_user;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.upload_limit_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Signup flow
        .route("/api/users", post(handle_create_user))
        .route(
            "/api/resume/upload",
            post(handle_upload_resume).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/jobs/match", post(handle_match_jobs))
        // Mock interview
        .route("/api/interview/questions", post(handle_questions))
        .route("/api/interview/transcribe", post(handle_transcribe))
        .with_state(state)
}
