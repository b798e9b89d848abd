use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::{AppError, OrFail};
use crate::resume::upload::read_upload_form;
use crate::state::AppState;

const UPLOAD_FAILED: &str = "Failed to upload resume";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
}

/// POST /api/resume/upload
///
/// Multipart fields `file` and `userId`. Stores the file's text verbatim on
/// the user record, replacing any earlier upload.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let form = read_upload_form(multipart.or_fail(UPLOAD_FAILED)?)
        .await
        .or_fail(UPLOAD_FAILED)?;

    let (Some(file), Some(user_id)) = (form.file, form.user_id.filter(|id| !id.is_empty())) else {
        return Err(AppError::BadRequest("Missing file or userId".to_string()));
    };

    let user_id = Uuid::parse_str(user_id.trim()).or_fail(UPLOAD_FAILED)?;
    let resume_text = file.text();

    state
        .store
        .attach_resume(user_id, &resume_text)
        .await
        .or_fail(UPLOAD_FAILED)?;

    info!(
        %user_id,
        file_name = file.file_name.as_deref().unwrap_or("<unnamed>"),
        bytes = file.bytes.len(),
        "Resume attached"
    );
    Ok(Json(UploadResponse { success: true }))
}
