use std::sync::Mutex;

use async_trait::async_trait;

use crate::client::{ApiError, Job, PrepApi, SignupRequest};

/// Scripted `PrepApi` that records what the views send.
pub struct FakeApi {
    fail: bool,
    jobs: Vec<Job>,
    questions: Vec<String>,
    signups: Mutex<Vec<SignupRequest>>,
    uploads: Mutex<Vec<(String, String)>>,
}

impl FakeApi {
    pub const USER_ID: &'static str = "user-42";

    /// Every call fails with a 500.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_questions(questions: &[&str]) -> Self {
        Self {
            questions: questions.iter().map(|q| q.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn signups(&self) -> Vec<SignupRequest> {
        self.signups.lock().unwrap().clone()
    }

    /// `(user_id, file_name)` per upload.
    pub fn uploads(&self) -> Vec<(String, String)> {
        self.uploads.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), ApiError> {
        if self.fail {
            return Err(ApiError::Status {
                status: 500,
                message: "boom".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for FakeApi {
    fn default() -> Self {
        let job = |id: &str, title: &str| Job {
            id: id.to_string(),
            title: title.to_string(),
            company: "Acme".to_string(),
            description: format!("{title} at Acme"),
            department: Some("Engineering".to_string()),
        };

        Self {
            fail: false,
            jobs: vec![job("job-1", "Backend Engineer"), job("job-2", "SRE")],
            questions: vec![
                "Tell me about yourself".to_string(),
                "What motivates you?".to_string(),
            ],
            signups: Mutex::new(Vec::new()),
            uploads: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl PrepApi for FakeApi {
    async fn create_user(&self, request: &SignupRequest) -> Result<String, ApiError> {
        self.check()?;
        self.signups.lock().unwrap().push(request.clone());
        Ok(Self::USER_ID.to_string())
    }

    async fn upload_resume(
        &self,
        user_id: &str,
        file_name: &str,
        _contents: Vec<u8>,
    ) -> Result<(), ApiError> {
        self.check()?;
        self.uploads
            .lock()
            .unwrap()
            .push((user_id.to_string(), file_name.to_string()));
        Ok(())
    }

    async fn match_jobs(&self, _user_id: &str) -> Result<Vec<Job>, ApiError> {
        self.check()?;
        Ok(self.jobs.clone())
    }

    async fn interview_questions(
        &self,
        _user_id: &str,
        _job_id: &str,
    ) -> Result<Vec<String>, ApiError> {
        self.check()?;
        Ok(self.questions.clone())
    }
}
