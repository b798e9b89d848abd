use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{Store, StoreError};
use crate::models::job::JobDescription;
use crate::models::user::{NewUser, User};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        let result = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, full_name, age)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, full_name, age, resume_markdown, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new_user.email)
        .bind(&new_user.full_name)
        .bind(new_user.age)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(StoreError::DuplicateEmail(new_user.email))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn attach_resume(&self, user_id: Uuid, resume_text: &str) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE users SET resume_markdown = $1, updated_at = now() WHERE id = $2",
        )
        .bind(resume_text)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::UserNotFound(user_id));
        }
        Ok(())
    }

    async fn latest_jobs(&self, limit: i64) -> Result<Vec<JobDescription>, StoreError> {
        let jobs = sqlx::query_as::<_, JobDescription>(
            r#"
            SELECT id, title, company, description, department, created_at
            FROM job_descriptions
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(jobs)
    }
}
