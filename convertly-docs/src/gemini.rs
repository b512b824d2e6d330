//! Gemini `generateContent` client
//!
//! Async reqwest client; a single request per document, no streaming.

use std::time::Duration;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use crate::{DocumentError, TextService};

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Connection settings for the Gemini API
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        GeminiConfig {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Builder: override the model name
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Builder: override the API base URL
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate. An empty string is a valid
    /// answer; a response without any candidate content is not.
    fn text(self) -> Result<String, DocumentError> {
        let content = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .ok_or_else(|| DocumentError::InvalidResponse("no candidates in response".to_string()))?;

        Ok(content
            .parts
            .into_iter()
            .filter_map(|p| p.text)
            .collect::<Vec<_>>()
            .join(""))
    }
}

/// Error for a non-success status. When the body cannot be read, the status
/// reason stands in for it.
fn http_error<E: std::fmt::Display>(status: StatusCode, body: Result<String, E>) -> DocumentError {
    let message = match body {
        Ok(body) => body,
        Err(e) => {
            debug!(error = %e, "failed to read error body");
            format!(
                "{} (body unreadable: {})",
                status.canonical_reason().unwrap_or("unknown status"),
                e
            )
        }
    };
    DocumentError::Http {
        status: status.as_u16(),
        message,
    }
}

/// `TextService` backed by the Gemini REST API
#[derive(Clone)]
pub struct GeminiService {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiService {
    pub fn new(config: GeminiConfig) -> Result<Self, DocumentError> {
        if config.api_key.trim().is_empty() {
            return Err(DocumentError::NotConfigured);
        }

        let http = reqwest::Client::builder()
            .user_agent(format!("convertly/{}", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()
            .map_err(|e| DocumentError::Network(e.to_string()))?;

        Ok(GeminiService { http, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }
}

#[async_trait]
impl TextService for GeminiService {
    async fn generate(&self, prompt: &str) -> Result<String, DocumentError> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        debug!(model = %self.config.model, "calling generateContent");

        let response = self
            .http
            .post(self.config.url())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| DocumentError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            error!(status = status.as_u16(), "generateContent failed");
            return Err(http_error(status, response.text().await));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| DocumentError::InvalidResponse(e.to_string()))?;

        parsed.text()
    }
}
