//! HTTP client for the matching service.

use std::future::Future;
use std::pin::Pin;

use reqwest::Url;
use serde::Deserialize;

use crate::request::MatchRequest;
use crate::response::MatchResult;
use crate::{Config, RequestError};

/// Something that can turn a [`MatchRequest`] into a [`MatchResult`].
pub trait MatchService: Send + Sync {
    fn match_resume<'a>(
        &'a self,
        request: &'a MatchRequest,
    ) -> Pin<Box<dyn Future<Output = Result<MatchResult, RequestError>> + Send + 'a>>;
}

/// Error body the service sends with 4xx/5xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
struct HealthBody {
    message: String,
}

/// [`MatchService`] backed by a multipart POST to the service endpoint.
#[derive(Debug, Clone)]
pub struct HttpMatcher {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpMatcher {
    pub fn new(endpoint: &str) -> Result<Self, RequestError> {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_client(client: reqwest::Client, endpoint: &str) -> Result<Self, RequestError> {
        let endpoint = Url::parse(endpoint).map_err(|e| RequestError::Endpoint {
            url: endpoint.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { client, endpoint })
    }

    pub fn from_config(config: &Config) -> Result<Self, RequestError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Self::with_client(builder.build()?, &config.endpoint)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Query the health route at the service root and return its message.
    pub async fn ping(&self) -> Result<String, RequestError> {
        let root = self
            .endpoint
            .join("/")
            .map_err(|e| RequestError::Endpoint {
                url: self.endpoint.to_string(),
                reason: e.to_string(),
            })?;

        let resp = self.client.get(root).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(status_error(status.as_u16(), &body));
        }
        let health: HealthBody = serde_json::from_str(&body)?;
        Ok(health.message)
    }

    async fn post_match(&self, request: &MatchRequest) -> Result<MatchResult, RequestError> {
        let form = request.to_form()?;
        tracing::debug!(endpoint = %self.endpoint, "posting match request");

        let resp = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(status_error(status.as_u16(), &body));
        }

        let result = MatchResult::from_json(&body)?;
        tracing::debug!(
            similarity = ?result.similarity,
            rewrites = result.rewrite_kind().as_str(),
            "match response parsed"
        );
        Ok(result)
    }
}

impl MatchService for HttpMatcher {
    fn match_resume<'a>(
        &'a self,
        request: &'a MatchRequest,
    ) -> Pin<Box<dyn Future<Output = Result<MatchResult, RequestError>> + Send + 'a>> {
        Box::pin(self.post_match(request))
    }
}

/// Prefer the service's own `{"error": ...}` text; fall back to the raw body.
fn status_error(status: u16, body: &str) -> RequestError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| body.trim().chars().take(200).collect());
    RequestError::Status { status, message }
}
