//! HTTP client for the prep API. Each view talks to exactly one endpoint
//! through the `PrepApi` trait; `HttpApi` is the reqwest-backed implementation.

use async_trait::async_trait;
use reqwest::{multipart, Client, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Status { status: u16, message: String },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    pub full_name: String,
    /// `None` when the form's age did not parse; the server rejects it.
    pub age: Option<i32>,
}

/// A job as the jobs view shows it. Extra fields from the server are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Job {
    pub id: String,
    pub title: String,
    pub company: String,
    pub description: String,
    pub department: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreateUserResponse {
    #[serde(rename = "userId")]
    user_id: String,
}

#[derive(Debug, Deserialize)]
struct QuestionsResponse {
    #[serde(default)]
    questions: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[async_trait]
pub trait PrepApi: Send + Sync {
    /// POST /api/users. Returns the new user id.
    async fn create_user(&self, request: &SignupRequest) -> Result<String, ApiError>;

    /// POST /api/resume/upload
    async fn upload_resume(
        &self,
        user_id: &str,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<(), ApiError>;

    /// POST /api/jobs/match
    async fn match_jobs(&self, user_id: &str) -> Result<Vec<Job>, ApiError>;

    /// POST /api/interview/questions
    async fn interview_questions(
        &self,
        user_id: &str,
        job_id: &str,
    ) -> Result<Vec<String>, ApiError>;
}

#[derive(Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(concat!("prep-flow/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!("POST {path}");
        let response = self.client.post(self.url(path)).json(body).send().await?;
        decode(response).await
    }
}

#[async_trait]
impl PrepApi for HttpApi {
    async fn create_user(&self, request: &SignupRequest) -> Result<String, ApiError> {
        let response: CreateUserResponse = self.post_json("/api/users", request).await?;
        Ok(response.user_id)
    }

    async fn upload_resume(
        &self,
        user_id: &str,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<(), ApiError> {
        let form = multipart::Form::new()
            .part(
                "file",
                multipart::Part::bytes(contents).file_name(file_name.to_string()),
            )
            .text("userId", user_id.to_string());

        debug!("POST /api/resume/upload ({file_name})");
        let response = self
            .client
            .post(self.url("/api/resume/upload"))
            .multipart(form)
            .send()
            .await?;
        let _: serde_json::Value = decode(response).await?;
        Ok(())
    }

    async fn match_jobs(&self, user_id: &str) -> Result<Vec<Job>, ApiError> {
        self.post_json("/api/jobs/match", &json!({ "userId": user_id }))
            .await
    }

    async fn interview_questions(
        &self,
        user_id: &str,
        job_id: &str,
    ) -> Result<Vec<String>, ApiError> {
        let response: QuestionsResponse = self
            .post_json(
                "/api/interview/questions",
                &json!({ "userId": user_id, "jobId": job_id }),
            )
            .await?;
        Ok(response.questions.unwrap_or_default())
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Status {
            status: status.as_u16(),
            message: error_message(body),
        });
    }

    Ok(response.json().await?)
}

/// Pulls `error` out of a `{"error": "..."}` body, falling back to the raw text.
fn error_message(body: String) -> String {
    serde_json::from_str::<ErrorBody>(&body)
        .map(|e| e.error)
        .unwrap_or(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let api = HttpApi::new("http://localhost:8080/").unwrap();
        assert_eq!(api.url("/api/users"), "http://localhost:8080/api/users");
    }

    #[test]
    fn test_error_message_prefers_error_field() {
        assert_eq!(
            error_message(r#"{"error":"Failed to fetch jobs"}"#.to_string()),
            "Failed to fetch jobs"
        );
        assert_eq!(error_message("Bad Gateway".to_string()), "Bad Gateway");
    }

    #[test]
    fn test_signup_request_uses_camel_case_and_null_age() {
        let request = SignupRequest {
            email: "a@x.com".to_string(),
            full_name: "A".to_string(),
            age: None,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "email": "a@x.com", "fullName": "A", "age": null })
        );
    }

    #[test]
    fn test_job_ignores_server_only_fields() {
        let job: Job = serde_json::from_value(json!({
            "id": "j-1",
            "title": "Backend Engineer",
            "company": "Acme",
            "description": "Rust services",
            "department": null,
            "createdAt": "2026-01-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(job.title, "Backend Engineer");
        assert_eq!(job.department, None);
    }
}
