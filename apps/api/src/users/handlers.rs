use axum::{body::Bytes, extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::{AppError, OrFail};
use crate::models::user::NewUser;
use crate::state::AppState;

const CREATE_USER_FAILED: &str = "Failed to create user";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub email: String,
    pub full_name: String,
    pub age: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserResponse {
    pub user_id: Uuid,
}

/// POST /api/users
///
/// Signup. Every failure, from a missing field to a duplicate email, is a 500
/// with the same message.
pub async fn handle_create_user(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<CreateUserResponse>, AppError> {
    let request: CreateUserRequest = serde_json::from_slice(&body).or_fail(CREATE_USER_FAILED)?;

    let user = state
        .store
        .create_user(NewUser {
            email: request.email,
            full_name: request.full_name,
            age: request.age,
        })
        .await
        .or_fail(CREATE_USER_FAILED)?;

    info!(user_id = %user.id, "User created");
    Ok(Json(CreateUserResponse { user_id: user.id }))
}
