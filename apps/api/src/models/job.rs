use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A job posting. Read-only from the API's side; rows are loaded out of band.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JobDescription {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub description: String,
    pub department: Option<String>,
    pub created_at: DateTime<Utc>,
}
