//! Text-generation clients for Valentine.
//!
//! # Architecture
//!
//! The engine only sees [`TextGenerator`]: given a prompt, produce a
//! [`GenerationOutcome`] from a boxed future it can spawn. The production
//! implementation is [`gemini::GeminiClient`], a single non-streaming call to the
//! Gemini `generateContent` endpoint.
//!
//! # Error Handling
//!
//! Nothing here panics or retries. Every failure (missing key, transport, HTTP
//! status, undecodable body) is returned as a [`GenerationError`] and it is up to
//! the caller to decide what the user sees.

pub mod gemini;

pub use futures_util::future::BoxFuture;
pub use gemini::GeminiClient;
pub use valentine_types::{GenerationError, GenerationOutcome};

use std::time::Duration;

const CONNECT_TIMEOUT_SECS: u64 = 30;

// Note: reqwest only exposes tcp_keepalive (idle time); interval/retries use platform defaults.
const TCP_KEEPALIVE_SECS: u64 = 60;

const MAX_ERROR_BODY_BYTES: usize = 32 * 1024;

/// Something that turns a prompt into (maybe) a short text.
pub trait TextGenerator: Send + Sync {
    /// Start one generation. The returned future owns everything it needs.
    fn generate(&self, prompt: String) -> BoxFuture<'static, GenerationOutcome>;

    /// Model identifier, for logs.
    fn model(&self) -> &str;
}

fn base_client_builder() -> reqwest::ClientBuilder {
    use reqwest::header::{HeaderMap, HeaderValue};

    let mut default_headers = HeaderMap::new();
    default_headers.insert(
        "x-client-name",
        HeaderValue::from_static(concat!("valentine/", env!("CARGO_PKG_VERSION"))),
    );

    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .redirect(reqwest::redirect::Policy::none())
        .tcp_keepalive(Some(Duration::from_secs(TCP_KEEPALIVE_SECS)))
        .default_headers(default_headers)
}

/// Build a client with a total request timeout.
///
/// `https_only` is relaxed only for plain-http endpoints (local mocks, proxies).
pub fn http_client_with_timeout(
    timeout: Duration,
    https_only: bool,
) -> Result<reqwest::Client, reqwest::Error> {
    base_client_builder()
        .timeout(timeout)
        .https_only(https_only)
        .build()
}

/// Read an error body, truncated to a sane size.
pub async fn read_capped_error_body(response: reqwest::Response) -> String {
    use futures_util::StreamExt;
    let mut body = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let Ok(chunk) = chunk else { break };
        body.extend_from_slice(&chunk);
        if body.len() > MAX_ERROR_BODY_BYTES {
            body.truncate(MAX_ERROR_BODY_BYTES);
            let text = String::from_utf8_lossy(&body);
            return format!("{text}...(truncated)");
        }
    }
    String::from_utf8_lossy(&body).into_owned()
}

/// Pull a human-readable message out of a JSON error body, if there is one.
#[must_use]
pub fn extract_error_message(body: &str) -> Option<String> {
    let payload: serde_json::Value = serde_json::from_str(body.trim()).ok()?;
    payload
        .pointer("/error/message")
        .and_then(|value| value.as_str())
        .or_else(|| payload.pointer("/message").and_then(|value| value.as_str()))
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::{extract_error_message, http_client_with_timeout};
    use std::time::Duration;

    #[test]
    fn extracts_google_error_message() {
        let body = r#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(
            extract_error_message(body).as_deref(),
            Some("API key not valid.")
        );
    }

    #[test]
    fn extracts_top_level_message() {
        assert_eq!(
            extract_error_message(r#"{"message":"nope"}"#).as_deref(),
            Some("nope")
        );
    }

    #[test]
    fn non_json_has_no_message() {
        assert!(extract_error_message("<html>502</html>").is_none());
        assert!(extract_error_message(r#"{"error":{}}"#).is_none());
    }

    #[test]
    fn client_builds() {
        assert!(http_client_with_timeout(Duration::from_secs(5), true).is_ok());
        assert!(http_client_with_timeout(Duration::from_secs(5), false).is_ok());
    }
}
