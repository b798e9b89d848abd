//! Persistence seam for users and job descriptions.
//!
//! `AppState` holds an `Arc<dyn Store>`. Production uses `PgStore`; router
//! tests swap in the in-memory store. Every operation is a single statement
//! with no transaction around it.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::job::JobDescription;
use crate::models::user::{NewUser, User};

pub mod postgres;

#[cfg(test)]
pub mod memory;

pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("a user with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("user {0} not found")]
    UserNotFound(Uuid),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait Store: Send + Sync {
    /// Inserts a new user. Email is unique; a second insert with the same
    /// email fails with `StoreError::DuplicateEmail`.
    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError>;

    /// Overwrites the user's stored resume text.
    async fn attach_resume(&self, user_id: Uuid, resume_text: &str) -> Result<(), StoreError>;

    /// Returns at most `limit` job descriptions, newest first.
    async fn latest_jobs(&self, limit: i64) -> Result<Vec<JobDescription>, StoreError>;
}
