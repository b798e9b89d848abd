use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::{Store, StoreError};
use crate::models::job::JobDescription;
use crate::models::user::{NewUser, User};

/// In-process store with the same uniqueness and ordering rules as `PgStore`.
#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
    jobs: Mutex<Vec<JobDescription>>,
}

impl MemoryStore {
    pub fn with_jobs(jobs: Vec<JobDescription>) -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            jobs: Mutex::new(jobs),
        }
    }

    pub fn user(&self, id: Uuid) -> Option<User> {
        self.users.lock().unwrap().iter().find(|u| u.id == id).cloned()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == new_user.email) {
            return Err(StoreError::DuplicateEmail(new_user.email));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: new_user.email,
            full_name: new_user.full_name,
            age: new_user.age,
            resume_markdown: None,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn attach_resume(&self, user_id: Uuid, resume_text: &str) -> Result<(), StoreError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or(StoreError::UserNotFound(user_id))?;
        user.resume_markdown = Some(resume_text.to_string());
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn latest_jobs(&self, limit: i64) -> Result<Vec<JobDescription>, StoreError> {
        let mut jobs = self.jobs.lock().unwrap().clone();
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        jobs.truncate(limit.max(0) as usize);
        Ok(jobs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn job(title: &str, minutes_ago: i64) -> JobDescription {
        JobDescription {
            id: Uuid::new_v4(),
            title: title.to_string(),
            company: "Acme".to_string(),
            description: "Build things".to_string(),
            department: None,
            created_at: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    fn signup(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            full_name: "A".to_string(),
            age: 20,
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let store = MemoryStore::default();
        store.create_user(signup("a@x.com")).await.unwrap();

        let err = store.create_user(signup("a@x.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail(email) if email == "a@x.com"));
    }

    #[tokio::test]
    async fn test_attach_resume_overwrites_previous_text() {
        let store = MemoryStore::default();
        let user = store.create_user(signup("a@x.com")).await.unwrap();

        store.attach_resume(user.id, "first").await.unwrap();
        store.attach_resume(user.id, "second").await.unwrap();

        assert_eq!(store.user(user.id).unwrap().resume_markdown.as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_attach_resume_to_unknown_user_fails() {
        let store = MemoryStore::default();
        let err = store.attach_resume(Uuid::new_v4(), "text").await.unwrap_err();
        assert!(matches!(err, StoreError::UserNotFound(_)));
    }

    #[tokio::test]
    async fn test_latest_jobs_newest_first_and_capped() {
        let store = MemoryStore::with_jobs(vec![
            job("old", 60),
            job("newest", 1),
            job("middle", 30),
        ]);

        let titles: Vec<String> = store
            .latest_jobs(2)
            .await
            .unwrap()
            .into_iter()
            .map(|j| j.title)
            .collect();
        assert_eq!(titles, vec!["newest", "middle"]);
    }
}
