//! Wire-contract tests for [`HttpMatcher`] and [`FormController`].
//!
//! A local axum server stands in for the matching service: it records the
//! multipart fields it receives and answers with a canned status and body.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use serde_json::{Value, json};

use jdmatch_core::{
    Failure, FormController, HttpMatcher, InputMode, MatchService, Phase, REQUEST_FAILED_MESSAGE,
    ResumeFile, RewriteKind,
};

#[derive(Debug, Clone)]
struct ReceivedField {
    name: String,
    file_name: Option<String>,
    content_type: Option<String>,
    data: Vec<u8>,
}

#[derive(Clone)]
struct StubService {
    received: Arc<Mutex<Vec<Vec<ReceivedField>>>>,
    status: StatusCode,
    body: Value,
}

impl StubService {
    fn new(status: StatusCode, body: Value) -> Self {
        Self {
            received: Arc::new(Mutex::new(Vec::new())),
            status,
            body,
        }
    }

    fn requests(&self) -> Vec<Vec<ReceivedField>> {
        self.received.lock().unwrap().clone()
    }
}

async fn match_jd(
    State(stub): State<StubService>,
    mut multipart: Multipart,
) -> (StatusCode, axum::Json<Value>) {
    let mut fields = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or("").to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.unwrap().to_vec();
        fields.push(ReceivedField {
            name,
            file_name,
            content_type,
            data,
        });
    }
    stub.received.lock().unwrap().push(fields);
    (stub.status, axum::Json(stub.body.clone()))
}

async fn home() -> axum::Json<Value> {
    axum::Json(json!({"message": "Resume ↔ JD Matcher API is running!"}))
}

/// Start the stub and return the full endpoint URL.
async fn spawn_stub(stub: StubService) -> String {
    let app = Router::new()
        .route("/", get(home))
        .route("/match_jd", post(match_jd))
        .with_state(stub);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/match_jd")
}

fn field_names(fields: &[ReceivedField]) -> Vec<&str> {
    fields.iter().map(|f| f.name.as_str()).collect()
}

fn sample_body() -> Value {
    json!({
        "similarity": 67.3,
        "match_status": "Partial Match ⚠️",
        "missing_skills": ["SQL", "Go"],
        "summary": "Reasonable overlap.",
        "sections": [
            {"section_name": "Profile", "original_text": "Dev", "rewritten_text": "Backend dev"}
        ]
    })
}

#[tokio::test]
async fn file_submission_sends_resume_and_jd_only() {
    let stub = StubService::new(StatusCode::OK, sample_body());
    let endpoint = spawn_stub(stub.clone()).await;
    let matcher = HttpMatcher::new(&endpoint).unwrap();

    let mut form = FormController::new();
    form.set_input_mode(InputMode::File);
    form.set_resume_file(Some(ResumeFile::new("cv.pdf", b"%PDF-1.4 test".to_vec())));
    form.set_resume_text("left over from text mode");
    form.set_job_description("Senior Rust engineer");

    form.submit(&matcher).await;

    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    let fields = &requests[0];
    assert_eq!(field_names(fields), vec!["resume", "jd"]);

    let resume = &fields[0];
    assert_eq!(resume.file_name.as_deref(), Some("cv.pdf"));
    assert_eq!(resume.content_type.as_deref(), Some("application/pdf"));
    assert_eq!(resume.data, b"%PDF-1.4 test");
    assert_eq!(fields[1].data, b"Senior Rust engineer");

    let result = form.result().expect("result stored");
    assert_eq!(result.similarity, Some(67.3));
    assert_eq!(result.missing_skills, vec!["SQL", "Go"]);
    assert_eq!(result.rewrite_kind(), RewriteKind::Sections);
}

#[tokio::test]
async fn text_submission_sends_resume_text_and_jd_only() {
    let stub = StubService::new(StatusCode::OK, json!({}));
    let endpoint = spawn_stub(stub.clone()).await;
    let matcher = HttpMatcher::new(&endpoint).unwrap();

    let mut form = FormController::new();
    form.set_input_mode(InputMode::Text);
    form.set_resume_text("  Rust, Tokio, Postgres  ");
    form.set_job_description("Platform engineer");

    form.submit(&matcher).await;

    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    let fields = &requests[0];
    assert_eq!(field_names(fields), vec!["resume_text", "jd"]);
    assert_eq!(fields[0].file_name, None);
    assert_eq!(fields[0].data, b"  Rust, Tokio, Postgres  ");

    let result = form.result().expect("empty object is still a result");
    assert_eq!(result.rewrite_kind(), RewriteKind::None);
}

#[tokio::test]
async fn validation_failure_makes_no_request() {
    let stub = StubService::new(StatusCode::OK, sample_body());
    let endpoint = spawn_stub(stub.clone()).await;
    let matcher = HttpMatcher::new(&endpoint).unwrap();

    let mut form = FormController::new();
    form.set_job_description("Platform engineer");
    form.submit(&matcher).await;

    form.set_input_mode(InputMode::Text);
    form.set_resume_text("cv");
    form.set_job_description("   ");
    form.submit(&matcher).await;

    assert!(matches!(form.phase(), Phase::Failed(Failure::Validation(_))));
    assert!(stub.requests().is_empty());
}

#[tokio::test]
async fn server_error_yields_generic_message() {
    let stub = StubService::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({"error": "Server error: model not loaded"}),
    );
    let endpoint = spawn_stub(stub.clone()).await;
    let matcher = HttpMatcher::new(&endpoint).unwrap();

    let mut form = FormController::new();
    form.set_input_mode(InputMode::Text);
    form.set_resume_text("cv");
    form.set_job_description("jd");
    form.submit(&matcher).await;

    assert_eq!(form.phase(), &Phase::Failed(Failure::Request));
    assert_eq!(form.error_message(), Some(REQUEST_FAILED_MESSAGE));
    assert_eq!(stub.requests().len(), 1);
}

#[tokio::test]
async fn service_error_body_is_kept_for_logs() {
    let stub = StubService::new(
        StatusCode::BAD_REQUEST,
        json!({"error": "Please provide a job description."}),
    );
    let endpoint = spawn_stub(stub).await;
    let matcher = HttpMatcher::new(&endpoint).unwrap();

    let request = jdmatch_core::MatchRequest::from_input(InputMode::Text, None, "cv", "jd")
        .unwrap();
    let err = matcher.match_resume(&request).await.unwrap_err();
    let detail = err.to_string();
    assert!(detail.contains("400"), "{detail}");
    assert!(detail.contains("Please provide a job description."), "{detail}");
    assert_eq!(err.user_message(), REQUEST_FAILED_MESSAGE);
}

#[tokio::test]
async fn connection_refused_yields_generic_message() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let matcher = HttpMatcher::new(&format!("http://{addr}/match_jd")).unwrap();
    let mut form = FormController::new();
    form.set_input_mode(InputMode::Text);
    form.set_resume_text("cv");
    form.set_job_description("jd");

    form.submit(&matcher).await;

    assert_eq!(form.error_message(), Some(REQUEST_FAILED_MESSAGE));
    assert!(!form.is_submitting());
}

#[tokio::test]
async fn malformed_body_is_a_request_failure() {
    let stub = StubService::new(StatusCode::OK, json!("just a string"));
    let endpoint = spawn_stub(stub).await;
    let matcher = HttpMatcher::new(&endpoint).unwrap();

    let mut form = FormController::new();
    form.set_input_mode(InputMode::Text);
    form.set_resume_text("cv");
    form.set_job_description("jd");
    form.submit(&matcher).await;

    assert_eq!(form.phase(), &Phase::Failed(Failure::Request));
}

#[tokio::test]
async fn ping_reads_health_message() {
    let stub = StubService::new(StatusCode::OK, json!({}));
    let endpoint = spawn_stub(stub).await;
    let matcher = HttpMatcher::new(&endpoint).unwrap();

    let message = matcher.ping().await.unwrap();
    assert_eq!(message, "Resume ↔ JD Matcher API is running!");
}
