use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Only two shapes reach the wire: a 400 for missing input and a generic 500
/// carrying the handler's context string. The underlying cause is logged and
/// never sent to the caller.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("{context}: {source:#}")]
    Failed {
        context: &'static str,
        source: anyhow::Error,
    },
}

impl AppError {
    pub fn failed(context: &'static str, source: impl Into<anyhow::Error>) -> Self {
        AppError::Failed {
            context,
            source: source.into(),
        }
    }
}

/// Attaches a handler's public failure message to any error.
pub trait OrFail<T> {
    fn or_fail(self, context: &'static str) -> Result<T, AppError>;
}

impl<T, E> OrFail<T> for Result<T, E>
where
    E: Into<anyhow::Error>,
{
    fn or_fail(self, context: &'static str) -> Result<T, AppError> {
        self.map_err(|e| AppError::failed(context, e))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Failed { context, source } => {
                tracing::error!("{context}: {source:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, context.to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
