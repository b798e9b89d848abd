//! Terminal driver for the flow: renders each view as text, reads choices
//! line by line, and follows the views' navigation until the user quits.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::views::{
    FeedbackView, FlowContext, HomeView, InterviewView, JobsView, Mounted, ResumeFile,
    SignupForm, Step, Transition, UploadView, ACCEPTED_RESUME_EXTENSIONS,
};

pub struct Walkthrough<R, W> {
    ctx: FlowContext,
    lines: Lines<R>,
    out: W,
}

impl<R, W> Walkthrough<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(ctx: FlowContext, input: R, out: W) -> Self {
        Self {
            ctx,
            lines: input.lines(),
            out,
        }
    }

    /// Runs from `start` until the user quits or input ends. Hands the
    /// output back when done.
    pub async fn run(mut self, start: Step) -> Result<W> {
        let mut step = start;
        loop {
            writeln!(self.out, "\n== {} ==", step.path())?;
            let next = match step {
                Step::Home => self.home().await?,
                Step::Upload => self.upload().await?,
                Step::Jobs => self.jobs().await?,
                Step::Interview => self.interview().await?,
                Step::Feedback => self.feedback().await?,
            };
            match next {
                Some(next) => step = next,
                None => break,
            }
        }

        writeln!(self.out, "Goodbye.")?;
        Ok(self.out)
    }

    async fn home(&mut self) -> Result<Option<Step>> {
        writeln!(self.out, "AI Interview Prep")?;
        writeln!(self.out, "Practice interviews with AI-powered feedback")?;

        let Some(full_name) = self.read_line("Full name").await? else {
            return Ok(None);
        };
        let Some(email) = self.read_line("Email").await? else {
            return Ok(None);
        };
        let Some(age) = self.read_line("Age").await? else {
            return Ok(None);
        };

        writeln!(self.out, "Creating your profile...")?;
        let form = SignupForm {
            full_name,
            email,
            age,
        };
        let transition = HomeView::new(self.ctx.clone()).submit(&form).await;
        if transition == Transition::Stay {
            writeln!(self.out, "Could not create your profile. Please try again.")?;
        }
        Ok(Some(follow(transition, Step::Home)))
    }

    async fn upload(&mut self) -> Result<Option<Step>> {
        writeln!(self.out, "Upload Resume")?;
        writeln!(self.out, "Upload your resume to get job recommendations")?;

        let Some(path) = self.choice("Resume file path (q to quit)").await? else {
            return Ok(None);
        };
        if path.is_empty() {
            return Ok(Some(Step::Upload));
        }

        let name = Path::new(&path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.clone());
        let mut file = ResumeFile {
            name,
            contents: Vec::new(),
        };
        if !file.is_accepted() {
            writeln!(
                self.out,
                "Accepted formats: {}",
                ACCEPTED_RESUME_EXTENSIONS
                    .iter()
                    .map(|ext| format!(".{ext}"))
                    .collect::<Vec<_>>()
                    .join(", ")
            )?;
            return Ok(Some(Step::Upload));
        }

        file.contents = match tokio::fs::read(&path).await {
            Ok(contents) => contents,
            Err(e) => {
                writeln!(self.out, "Could not read {path}: {e}")?;
                return Ok(Some(Step::Upload));
            }
        };

        writeln!(self.out, "Uploading...")?;
        let transition = UploadView::new(self.ctx.clone()).submit(Some(file)).await;
        if transition == Transition::Stay {
            writeln!(self.out, "Upload failed.")?;
        }
        Ok(Some(follow(transition, Step::Upload)))
    }

    async fn jobs(&mut self) -> Result<Option<Step>> {
        let view = JobsView::new(self.ctx.clone());
        writeln!(self.out, "Loading jobs...")?;
        let page = match view.mount().await {
            Mounted::Redirect(step) => return Ok(Some(step)),
            Mounted::Ready(page) => page,
        };

        writeln!(self.out, "Job Recommendations")?;
        if page.is_empty() {
            writeln!(self.out, "No jobs available at the moment.")?;
            return Ok(self
                .choice("Press enter to reload (q to quit)")
                .await?
                .map(|_| Step::Jobs));
        }

        for (i, job) in page.jobs.iter().enumerate() {
            writeln!(self.out, "{}. {} at {}", i + 1, job.title, job.company)?;
            if let Some(department) = &job.department {
                writeln!(self.out, "   {department}")?;
            }
            writeln!(self.out, "   {}", job.description)?;
        }

        let count = page.jobs.len();
        loop {
            let Some(pick) = self.choice(&format!("Pick a job (1-{count}, q to quit)")).await?
            else {
                return Ok(None);
            };
            match pick.parse::<usize>() {
                Ok(n) if (1..=count).contains(&n) => {
                    let transition = view.select(&page.jobs[n - 1].id);
                    return Ok(Some(follow(transition, Step::Jobs)));
                }
                _ => writeln!(self.out, "Enter a number between 1 and {count}.")?,
            }
        }
    }

    async fn interview(&mut self) -> Result<Option<Step>> {
        writeln!(self.out, "Loading interview questions...")?;
        let mut session = match InterviewView::new(self.ctx.clone()).mount().await {
            Mounted::Redirect(step) => return Ok(Some(step)),
            Mounted::Ready(session) => session,
        };

        loop {
            let (position, total) = session.progress();
            writeln!(self.out, "Question {position} of {total}")?;
            if let Some(question) = session.current_question() {
                writeln!(self.out, "{question}")?;
            }

            let next_label = if session.is_last_question() {
                "Finish Interview"
            } else {
                "Next Question"
            };
            let Some(cmd) = self
                .choice(&format!("[r] Start Recording, [n] {next_label} (q to quit)"))
                .await?
            else {
                return Ok(None);
            };

            match cmd.as_str() {
                "r" => {
                    writeln!(self.out, "Recording...")?;
                    let transcript = session.start_recording().await;
                    writeln!(self.out, "{transcript}")?;
                }
                "n" | "" => {
                    if let Transition::Navigate(step) = session.next_question() {
                        return Ok(Some(step));
                    }
                }
                other => writeln!(self.out, "Unknown choice '{other}'.")?,
            }
        }
    }

    async fn feedback(&mut self) -> Result<Option<Step>> {
        let view = FeedbackView::new(self.ctx.clone());
        writeln!(self.out, "Generating feedback...")?;
        let page = match view.mount().await {
            Mounted::Redirect(step) => return Ok(Some(step)),
            Mounted::Ready(page) => page,
        };

        writeln!(self.out, "Interview Feedback")?;
        writeln!(self.out, "{}", page.text)?;

        loop {
            let Some(cmd) = self
                .choice("[j] Try Another Job, [s] Start Over (q to quit)")
                .await?
            else {
                return Ok(None);
            };
            let transition = match cmd.as_str() {
                "j" => view.try_another_job(),
                "s" => view.start_over(),
                other => {
                    writeln!(self.out, "Unknown choice '{other}'.")?;
                    continue;
                }
            };
            return Ok(Some(follow(transition, Step::Feedback)));
        }
    }

    /// Prompts and reads one line as typed. `None` once input is exhausted.
    async fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.out, "{prompt}: ")?;
        self.out.flush()?;
        Ok(self.lines.next_line().await?)
    }

    /// Reads a trimmed answer; `q` also ends the walkthrough.
    async fn choice(&mut self, prompt: &str) -> Result<Option<String>> {
        Ok(self
            .read_line(prompt)
            .await?
            .map(|answer| answer.trim().to_string())
            .filter(|answer| !answer.eq_ignore_ascii_case("q")))
    }
}

fn follow(transition: Transition, current: Step) -> Step {
    match transition {
        Transition::Navigate(step) => step,
        Transition::Stay => current,
    }
}
