//! The matcher form: input state plus one explicit lifecycle value.

use crate::client::MatchService;
use crate::request::{InputMode, MatchRequest, ResumeFile};
use crate::response::MatchResult;
use crate::{RequestError, ValidationError};

/// Why the last submission failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    Validation(ValidationError),
    /// Detail was logged when the failure was recorded.
    Request,
}

impl Failure {
    pub fn message(&self) -> &'static str {
        match self {
            Failure::Validation(e) => e.user_message(),
            Failure::Request => crate::REQUEST_FAILED_MESSAGE,
        }
    }
}

/// Request lifecycle. Exactly one of these holds at any time.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
    Succeeded(MatchResult),
    Failed(Failure),
}

/// A request that passed validation, numbered so late completions of an
/// older submission can be told apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub ticket: u64,
    pub request: MatchRequest,
}

#[derive(Debug, Clone, Default)]
pub struct FormController {
    mode: InputMode,
    resume_file: Option<ResumeFile>,
    resume_text: String,
    job_description: String,
    phase: Phase,
    last_ticket: u64,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch the resume source. The other source keeps its value.
    pub fn set_input_mode(&mut self, mode: InputMode) {
        self.mode = mode;
    }

    pub fn toggle_input_mode(&mut self) {
        self.mode = self.mode.toggled();
    }

    pub fn set_resume_file(&mut self, file: Option<ResumeFile>) {
        self.resume_file = file;
    }

    pub fn set_resume_text(&mut self, text: impl Into<String>) {
        self.resume_text = text.into();
    }

    pub fn set_job_description(&mut self, text: impl Into<String>) {
        self.job_description = text.into();
    }

    pub fn input_mode(&self) -> InputMode {
        self.mode
    }

    pub fn resume_file(&self) -> Option<&ResumeFile> {
        self.resume_file.as_ref()
    }

    pub fn resume_text(&self) -> &str {
        &self.resume_text
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::Submitting
    }

    pub fn result(&self) -> Option<&MatchResult> {
        match &self.phase {
            Phase::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&'static str> {
        match &self.phase {
            Phase::Failed(failure) => Some(failure.message()),
            _ => None,
        }
    }

    /// Label for the submit control.
    pub fn submit_label(&self) -> &'static str {
        if self.is_submitting() {
            "Analyzing..."
        } else {
            "Match Resume"
        }
    }

    /// Validate the form and, if it passes, enter `Submitting`.
    ///
    /// On failure the phase becomes `Failed(Validation)` and no request is
    /// produced. Calling this while already submitting starts a new
    /// submission; the older one's completion will be ignored.
    pub fn begin_submit(&mut self) -> Result<Submission, ValidationError> {
        let request = MatchRequest::from_input(
            self.mode,
            self.resume_file.as_ref(),
            &self.resume_text,
            &self.job_description,
        );

        match request {
            Ok(request) => {
                self.last_ticket += 1;
                self.phase = Phase::Submitting;
                tracing::debug!(ticket = self.last_ticket, "submission started");
                Ok(Submission {
                    ticket: self.last_ticket,
                    request,
                })
            }
            Err(err) => {
                tracing::debug!(error = %err, "submission rejected");
                self.phase = Phase::Failed(Failure::Validation(err));
                Err(err)
            }
        }
    }

    /// Record the outcome of submission `ticket`. Returns false, leaving the
    /// phase untouched, when a newer submission has started since.
    pub fn finish(&mut self, ticket: u64, outcome: Result<MatchResult, RequestError>) -> bool {
        if ticket != self.last_ticket || !self.is_submitting() {
            tracing::debug!(ticket, latest = self.last_ticket, "dropping stale completion");
            return false;
        }

        self.phase = match outcome {
            Ok(result) => Phase::Succeeded(result),
            Err(err) => {
                tracing::error!(ticket, error = %err, "match request failed");
                Phase::Failed(Failure::Request)
            }
        };
        true
    }

    /// Validate, send, and record the outcome in one go.
    pub async fn submit(&mut self, service: &dyn MatchService) -> &Phase {
        if let Ok(submission) = self.begin_submit() {
            let outcome = service.match_resume(&submission.request).await;
            self.finish(submission.ticket, outcome);
        }
        &self.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::ResumeSource;
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::Mutex;

    /// Records requests and answers with a canned outcome.
    struct FakeService {
        calls: Mutex<Vec<MatchRequest>>,
        fail: bool,
    }

    impl FakeService {
        fn ok() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl MatchService for FakeService {
        fn match_resume<'a>(
            &'a self,
            request: &'a MatchRequest,
        ) -> Pin<Box<dyn Future<Output = Result<MatchResult, RequestError>> + Send + 'a>>
        {
            Box::pin(async move {
                self.calls.lock().unwrap().push(request.clone());
                if self.fail {
                    Err(RequestError::Status {
                        status: 500,
                        message: "Server error: boom".into(),
                    })
                } else {
                    Ok(MatchResult {
                        similarity: Some(88.0),
                        ..MatchResult::default()
                    })
                }
            })
        }
    }

    fn filled_text_form() -> FormController {
        let mut form = FormController::new();
        form.set_input_mode(InputMode::Text);
        form.set_resume_text("Rust, Go, SQL");
        form.set_job_description("Backend engineer");
        form
    }

    #[test]
    fn starts_idle_in_file_mode() {
        let form = FormController::new();
        assert_eq!(form.phase(), &Phase::Idle);
        assert_eq!(form.input_mode(), InputMode::File);
        assert_eq!(form.submit_label(), "Match Resume");
    }

    #[test]
    fn mode_switch_preserves_both_sources() {
        let mut form = FormController::new();
        form.set_resume_file(Some(ResumeFile::new("cv.pdf", vec![1])));
        form.set_input_mode(InputMode::Text);
        form.set_resume_text("pasted");
        form.set_input_mode(InputMode::File);
        assert_eq!(form.resume_file().unwrap().file_name, "cv.pdf");
        assert_eq!(form.resume_text(), "pasted");
    }

    #[tokio::test]
    async fn no_resume_fails_without_network() {
        let service = FakeService::ok();
        let mut form = FormController::new();
        form.set_job_description("Backend engineer");

        let phase = form.submit(&service).await.clone();

        assert_eq!(
            phase,
            Phase::Failed(Failure::Validation(ValidationError::MissingResume))
        );
        assert_eq!(form.error_message(), Some(crate::VALIDATION_MESSAGE));
        assert_eq!(service.call_count(), 0);
    }

    #[tokio::test]
    async fn blank_jd_fails_without_network() {
        let service = FakeService::ok();
        let mut form = filled_text_form();
        form.set_job_description("   \t");

        form.submit(&service).await;

        assert!(form.error_message().is_some());
        assert_eq!(service.call_count(), 0);
    }

    #[tokio::test]
    async fn success_stores_result() {
        let service = FakeService::ok();
        let mut form = filled_text_form();

        form.submit(&service).await;

        assert_eq!(service.call_count(), 1);
        assert_eq!(form.result().unwrap().similarity, Some(88.0));
        assert!(!form.is_submitting());
        assert!(form.error_message().is_none());
        let sent = &service.calls.lock().unwrap()[0];
        assert_eq!(sent.resume, ResumeSource::Text("Rust, Go, SQL".into()));
    }

    #[tokio::test]
    async fn request_failure_shows_generic_message() {
        let service = FakeService::failing();
        let mut form = filled_text_form();

        form.submit(&service).await;

        assert_eq!(form.phase(), &Phase::Failed(Failure::Request));
        assert_eq!(form.error_message(), Some(crate::REQUEST_FAILED_MESSAGE));
        assert!(!form.is_submitting());
    }

    #[test]
    fn new_submit_clears_previous_error() {
        let mut form = FormController::new();
        assert!(form.begin_submit().is_err());
        form.set_input_mode(InputMode::Text);
        form.set_resume_text("cv");
        form.set_job_description("jd");
        form.begin_submit().unwrap();
        assert_eq!(form.phase(), &Phase::Submitting);
        assert!(form.error_message().is_none());
        assert_eq!(form.submit_label(), "Analyzing...");
    }

    #[test]
    fn new_submit_clears_previous_result() {
        let mut form = filled_text_form();
        let first = form.begin_submit().unwrap();
        form.finish(first.ticket, Ok(MatchResult::default()));
        assert!(form.result().is_some());

        form.begin_submit().unwrap();
        assert!(form.result().is_none());
    }

    #[test]
    fn stale_completion_is_dropped() {
        let mut form = filled_text_form();
        let first = form.begin_submit().unwrap();
        let second = form.begin_submit().unwrap();
        assert!(second.ticket > first.ticket);

        assert!(!form.finish(first.ticket, Ok(MatchResult::default())));
        assert!(form.is_submitting());

        assert!(form.finish(
            second.ticket,
            Err(RequestError::Status {
                status: 503,
                message: String::new()
            })
        ));
        assert_eq!(form.phase(), &Phase::Failed(Failure::Request));
    }

    #[test]
    fn completion_after_validation_failure_is_dropped() {
        let mut form = filled_text_form();
        let sub = form.begin_submit().unwrap();
        form.set_job_description("");
        assert!(form.begin_submit().is_err());
        assert!(!form.finish(sub.ticket, Ok(MatchResult::default())));
        assert!(matches!(form.phase(), Phase::Failed(Failure::Validation(_))));
    }
}
