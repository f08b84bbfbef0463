//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests.

#![allow(dead_code)]

use std::time::Duration;

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use valentine_config::GenerationSettings;

pub const TEST_MODEL: &str = "gemini-3-flash-preview";
pub const TEST_API_KEY: &str = "test-key";

/// Path the Gemini client posts to for [`TEST_MODEL`].
pub fn generate_path() -> String {
    format!("/models/{TEST_MODEL}:generateContent")
}

/// Start a mock server that simulates the Gemini API
pub async fn start_gemini_mock() -> MockServer {
    MockServer::start().await
}

/// Client settings pointed at a mock server.
pub fn settings_for(server: &MockServer) -> GenerationSettings {
    GenerationSettings {
        api_key: Some(TEST_API_KEY.to_string()),
        model: TEST_MODEL.to_string(),
        base_url: server.uri(),
        timeout: Duration::from_secs(5),
    }
}

/// A `generateContent` body carrying one text part.
pub fn text_response(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{ "text": text }]
            },
            "finishReason": "STOP",
            "index": 0
        }],
        "usageMetadata": {
            "promptTokenCount": 120,
            "candidatesTokenCount": 30,
            "totalTokenCount": 150
        },
        "modelVersion": TEST_MODEL
    })
}

/// Mount a successful text response
pub async fn mount_text_response(server: &MockServer, text: &str) {
    Mock::given(method("POST"))
        .and(path(generate_path()))
        .and(header("x-goog-api-key", TEST_API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response(text)))
        .mount(server)
        .await;
}

/// Mount an arbitrary JSON body with status 200
pub async fn mount_json_response(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path(generate_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Mount a Google-style error response
pub async fn mount_error_response(server: &MockServer, status: u16, message: &str) {
    let body = serde_json::json!({
        "error": {
            "code": status,
            "message": message,
            "status": "INVALID_ARGUMENT"
        }
    });

    Mock::given(method("POST"))
        .and(path(generate_path()))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

/// Mount a 200 response whose body is not JSON
pub async fn mount_raw_response(server: &MockServer, body: &str) {
    Mock::given(method("POST"))
        .and(path(generate_path()))
        .respond_with(ResponseTemplate::new(200).set_body_string(body.to_string()))
        .mount(server)
        .await;
}
