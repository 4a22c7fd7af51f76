use std::time::Duration;
use thiserror::Error;

pub mod client;
pub mod config_file;
pub mod controller;
pub mod render;
pub mod request;
pub mod response;

// Re-export for convenience
pub use client::{HttpMatcher, MatchService};
pub use controller::{Failure, FormController, Phase, Submission};
pub use render::{RenderedBlock, RenderedGroup, ResultView};
pub use request::{InputMode, MatchRequest, ResumeFile, ResumeSource};
pub use response::{MatchResult, PhraseReplacement, RewriteKind, Rewrites, SectionRewrite};

/// Matching endpoint used when nothing overrides it.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/match_jd";

/// Shown for any failed request, whatever the cause.
pub const REQUEST_FAILED_MESSAGE: &str = "Failed to get results. Check your backend connection.";

/// Shown when the resume source or the job description is missing.
pub const VALIDATION_MESSAGE: &str =
    "Please upload a resume file or paste resume text, and enter a job description.";

/// Local, pre-submission failure. No request is made when one of these occurs.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing resume or job description: no resume provided")]
    MissingResume,
    #[error("missing resume or job description: job description is blank")]
    MissingJobDescription,
}

impl ValidationError {
    /// The message shown to the user. Identical for every variant.
    pub fn user_message(&self) -> &'static str {
        VALIDATION_MESSAGE
    }
}

/// Any failure of the call to the matching service.
#[derive(Error, Debug)]
pub enum RequestError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("matching service returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("malformed response body: {0}")]
    Body(#[from] serde_json::Error),
    #[error("invalid endpoint '{url}': {reason}")]
    Endpoint { url: String, reason: String },
    #[error("request not dispatched: {0}")]
    Dispatch(String),
}

impl RequestError {
    /// The message shown to the user. The detail in `Display` is for logs only.
    pub fn user_message(&self) -> &'static str {
        REQUEST_FAILED_MESSAGE
    }
}

/// Resolved client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint: String,
    /// No timeout unless configured; the transport's defaults apply.
    pub timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: None,
        }
    }
}
