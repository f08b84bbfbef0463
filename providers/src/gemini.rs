//! Google Gemini client (GenerateContent API, non-streaming).

use futures_util::future::BoxFuture;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use valentine_config::GenerationSettings;

use crate::{
    GenerationError, GenerationOutcome, TextGenerator, extract_error_message,
    http_client_with_timeout, read_capped_error_body,
};

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
    /// Thought summaries are not part of the answer.
    #[serde(default)]
    thought: bool,
}

/// Build the request body for a single-turn prompt.
fn build_request_body(prompt: &str) -> Value {
    json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": prompt }]
        }]
    })
}

/// Text of the first candidate: its non-thought text parts, concatenated.
///
/// `Ok(None)` when the response carries no text at all.
fn parse_response_text(body: &str) -> GenerationOutcome {
    let response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| GenerationError::Malformed(e.to_string()))?;

    let Some(content) = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
    else {
        return Ok(None);
    };

    let mut texts = content
        .parts
        .into_iter()
        .filter(|part| !part.thought)
        .filter_map(|part| part.text)
        .peekable();
    if texts.peek().is_none() {
        return Ok(None);
    }
    Ok(Some(texts.collect()))
}

// ============================================================================
// Client
// ============================================================================

struct Inner {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct GeminiClient {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.inner.model)
            .field("base_url", &self.inner.base_url)
            .field("has_api_key", &self.inner.api_key.is_some())
            .finish()
    }
}

impl GeminiClient {
    pub fn new(settings: &GenerationSettings) -> Result<Self, reqwest::Error> {
        let https_only = settings.base_url.starts_with("https://");
        let http = http_client_with_timeout(settings.timeout, https_only)?;
        Ok(Self {
            inner: Arc::new(Inner {
                http,
                api_key: settings.api_key.clone(),
                model: settings.model.clone(),
                base_url: settings.base_url.trim_end_matches('/').to_string(),
            }),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.inner.base_url, self.inner.model
        )
    }

    /// One attempt, no retry.
    pub async fn generate_text(&self, prompt: &str) -> GenerationOutcome {
        let Some(api_key) = self.inner.api_key.as_deref() else {
            return Err(GenerationError::MissingApiKey);
        };

        tracing::debug!(model = %self.inner.model, "Requesting generateContent");

        let response = self
            .inner
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .header("content-type", "application/json")
            .json(&build_request_body(prompt))
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = read_capped_error_body(response).await;
            let detail = extract_error_message(&body).unwrap_or(body);
            return Err(GenerationError::Status {
                status: status.as_u16(),
                detail,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;
        parse_response_text(&body)
    }
}

impl TextGenerator for GeminiClient {
    fn generate(&self, prompt: String) -> BoxFuture<'static, GenerationOutcome> {
        let client = self.clone();
        Box::pin(async move { client.generate_text(&prompt).await })
    }

    fn model(&self) -> &str {
        &self.inner.model
    }
}
