//! The five views of the prep flow, as controllers.
//!
//! Each view checks the identifiers it needs in local storage, makes at most
//! one API call, and reports where the flow goes next. Nothing here retries;
//! a failed call is logged and the view stays put.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

use crate::client::{Job, PrepApi, SignupRequest};
use crate::storage::{LocalStore, SELECTED_JOB_ID, USER_EMAIL, USER_ID};

/// File extensions the upload view offers. The server does not check them.
pub const ACCEPTED_RESUME_EXTENSIONS: [&str; 4] = ["pdf", "doc", "docx", "txt"];

pub const SIMULATED_TRANSCRIPT: &str = "Sample transcript: This is a placeholder answer...";

pub const FEEDBACK_TEXT: &str = "\
Great job completing the interview! Here's your feedback:

• You demonstrated good communication skills
• Your answers were clear and concise
• Consider providing more specific examples
• Work on elaborating your technical experience

Keep practicing to improve your interview performance!";

const RECORDING_DELAY: Duration = Duration::from_secs(2);
const FEEDBACK_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Home,
    Upload,
    Jobs,
    Interview,
    Feedback,
}

impl Step {
    pub fn path(self) -> &'static str {
        match self {
            Step::Home => "/",
            Step::Upload => "/upload",
            Step::Jobs => "/jobs",
            Step::Interview => "/interview",
            Step::Feedback => "/feedback",
        }
    }

    /// The furthest step the stored identifiers let a returning user reach.
    pub fn resume_point(store: &dyn LocalStore) -> Step {
        match (store.get(USER_ID), store.get(SELECTED_JOB_ID)) {
            (None, _) => Step::Home,
            (Some(_), None) => Step::Jobs,
            (Some(_), Some(_)) => Step::Interview,
        }
    }
}

/// Result of a user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Navigate(Step),
    Stay,
}

/// Result of mounting a view that needs stored identifiers.
#[derive(Debug, PartialEq)]
pub enum Mounted<T> {
    Redirect(Step),
    Ready(T),
}

/// What every view needs: the API and the local store.
#[derive(Clone)]
pub struct FlowContext {
    pub api: Arc<dyn PrepApi>,
    pub store: Arc<dyn LocalStore>,
}

impl FlowContext {
    pub fn new(api: Arc<dyn PrepApi>, store: Arc<dyn LocalStore>) -> Self {
        Self { api, store }
    }

    fn remember(&self, key: &str, value: &str) -> bool {
        match self.store.set(key, value) {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to store {key}: {e}");
                false
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Home: signup
// ────────────────────────────────────────────────────────────────────────────

/// Signup form fields, as typed. Age stays text until submit. Only the email
/// is trimmed on the way out; the name is sent exactly as entered.
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub full_name: String,
    pub email: String,
    pub age: String,
}

impl SignupForm {
    fn to_request(&self) -> SignupRequest {
        SignupRequest {
            email: self.email.trim().to_string(),
            full_name: self.full_name.clone(),
            age: self.age.trim().parse().ok(),
        }
    }
}

pub struct HomeView {
    ctx: FlowContext,
}

impl HomeView {
    pub fn new(ctx: FlowContext) -> Self {
        Self { ctx }
    }

    pub async fn submit(&self, form: &SignupForm) -> Transition {
        let request = form.to_request();
        let user_id = match self.ctx.api.create_user(&request).await {
            Ok(user_id) => user_id,
            Err(e) => {
                error!("Signup failed: {e}");
                return Transition::Stay;
            }
        };

        if !self.ctx.remember(USER_ID, &user_id) || !self.ctx.remember(USER_EMAIL, &request.email)
        {
            return Transition::Stay;
        }

        info!(%user_id, "Profile created");
        Transition::Navigate(Step::Upload)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Upload: resume
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub name: String,
    pub contents: Vec<u8>,
}

impl ResumeFile {
    /// Whether the file picker would offer this file.
    pub fn is_accepted(&self) -> bool {
        std::path::Path::new(&self.name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                ACCEPTED_RESUME_EXTENSIONS
                    .iter()
                    .any(|accepted| accepted.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }
}

pub struct UploadView {
    ctx: FlowContext,
}

impl UploadView {
    pub fn new(ctx: FlowContext) -> Self {
        Self { ctx }
    }

    pub async fn submit(&self, file: Option<ResumeFile>) -> Transition {
        let Some(file) = file else {
            return Transition::Stay;
        };
        let Some(user_id) = self.ctx.store.get(USER_ID) else {
            return Transition::Navigate(Step::Home);
        };

        match self
            .ctx
            .api
            .upload_resume(&user_id, &file.name, file.contents)
            .await
        {
            Ok(()) => Transition::Navigate(Step::Jobs),
            Err(e) => {
                error!("Upload failed: {e}");
                Transition::Stay
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Jobs: pick one to interview for
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobsPage {
    pub jobs: Vec<Job>,
}

impl JobsPage {
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

pub struct JobsView {
    ctx: FlowContext,
}

impl JobsView {
    pub fn new(ctx: FlowContext) -> Self {
        Self { ctx }
    }

    pub async fn mount(&self) -> Mounted<JobsPage> {
        let Some(user_id) = self.ctx.store.get(USER_ID) else {
            return Mounted::Redirect(Step::Home);
        };

        let jobs = self.ctx.api.match_jobs(&user_id).await.unwrap_or_else(|e| {
            error!("Failed to load jobs: {e}");
            Vec::new()
        });
        Mounted::Ready(JobsPage { jobs })
    }

    pub fn select(&self, job_id: &str) -> Transition {
        if self.ctx.remember(SELECTED_JOB_ID, job_id) {
            Transition::Navigate(Step::Interview)
        } else {
            Transition::Stay
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Interview: step through questions
// ────────────────────────────────────────────────────────────────────────────

pub struct InterviewView {
    ctx: FlowContext,
    recording_delay: Duration,
}

impl InterviewView {
    pub fn new(ctx: FlowContext) -> Self {
        Self {
            ctx,
            recording_delay: RECORDING_DELAY,
        }
    }

    pub fn with_recording_delay(mut self, delay: Duration) -> Self {
        self.recording_delay = delay;
        self
    }

    pub async fn mount(&self) -> Mounted<InterviewSession> {
        let (Some(user_id), Some(job_id)) =
            (self.ctx.store.get(USER_ID), self.ctx.store.get(SELECTED_JOB_ID))
        else {
            return Mounted::Redirect(Step::Jobs);
        };

        let questions = self
            .ctx
            .api
            .interview_questions(&user_id, &job_id)
            .await
            .unwrap_or_else(|e| {
                error!("Failed to load interview questions: {e}");
                Vec::new()
            });

        Mounted::Ready(InterviewSession {
            questions,
            index: 0,
            transcript: None,
            recording: false,
            recording_delay: self.recording_delay,
        })
    }
}

/// A running interview. No audio is captured; recording waits out a fixed
/// delay and then shows a canned transcript.
#[derive(Debug, PartialEq)]
pub struct InterviewSession {
    questions: Vec<String>,
    index: usize,
    transcript: Option<String>,
    recording: bool,
    recording_delay: Duration,
}

impl InterviewSession {
    pub fn current_question(&self) -> Option<&str> {
        self.questions.get(self.index).map(String::as_str)
    }

    /// One-based position and total, e.g. `(1, 10)`.
    pub fn progress(&self) -> (usize, usize) {
        (self.index + 1, self.questions.len())
    }

    pub fn is_last_question(&self) -> bool {
        self.index + 1 >= self.questions.len()
    }

    pub fn transcript(&self) -> Option<&str> {
        self.transcript.as_deref()
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    pub async fn start_recording(&mut self) -> &str {
        self.recording = true;
        tokio::time::sleep(self.recording_delay).await;
        self.recording = false;
        self.transcript.insert(SIMULATED_TRANSCRIPT.to_string())
    }

    pub fn next_question(&mut self) -> Transition {
        if self.is_last_question() {
            return Transition::Navigate(Step::Feedback);
        }
        self.index += 1;
        self.transcript = None;
        Transition::Stay
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Feedback
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackPage {
    pub text: String,
}

pub struct FeedbackView {
    ctx: FlowContext,
    delay: Duration,
}

impl FeedbackView {
    pub fn new(ctx: FlowContext) -> Self {
        Self {
            ctx,
            delay: FEEDBACK_DELAY,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub async fn mount(&self) -> Mounted<FeedbackPage> {
        if self.ctx.store.get(USER_ID).is_none() {
            return Mounted::Redirect(Step::Home);
        }

        tokio::time::sleep(self.delay).await;
        Mounted::Ready(FeedbackPage {
            text: FEEDBACK_TEXT.to_string(),
        })
    }

    /// Forgets the selected job and returns to the job list.
    pub fn try_another_job(&self) -> Transition {
        if let Err(e) = self.ctx.store.remove(SELECTED_JOB_ID) {
            error!("Failed to clear {SELECTED_JOB_ID}: {e}");
        }
        Transition::Navigate(Step::Jobs)
    }

    pub fn start_over(&self) -> Transition {
        Transition::Navigate(Step::Home)
    }
}
