//! Gemini client against a mock server

use valentine_config::GenerationSettings;
use valentine_engine::{GenerationError, TextGenerator, proposal_prompt};
use valentine_providers::GeminiClient;
use wiremock::MockServer;

use crate::common::{
    TEST_API_KEY, TEST_MODEL, generate_path, mount_error_response, mount_json_response,
    mount_raw_response, mount_text_response, settings_for, start_gemini_mock,
};

fn client_for(server: &MockServer) -> GeminiClient {
    GeminiClient::new(&settings_for(server)).expect("client builds")
}

#[tokio::test]
async fn returns_candidate_text() {
    let server = start_gemini_mock().await;
    mount_text_response(&server, "Gina, ets el meu sol. T'estimo!").await;

    let outcome = client_for(&server).generate_text("hola").await;
    assert_eq!(
        outcome,
        Ok(Some("Gina, ets el meu sol. T'estimo!".to_string()))
    );
}

#[tokio::test]
async fn sends_key_header_and_single_turn_body() {
    let server = start_gemini_mock().await;
    mount_text_response(&server, "ok").await;

    let client = client_for(&server);
    let outcome = client.generate(proposal_prompt().to_string()).await;
    assert!(outcome.is_ok());

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.url.path(), generate_path());
    assert_eq!(
        request
            .headers
            .get("x-goog-api-key")
            .and_then(|v| v.to_str().ok()),
        Some(TEST_API_KEY)
    );

    let body: serde_json::Value = serde_json::from_slice(&request.body).expect("json body");
    assert_eq!(body["contents"][0]["role"], "user");
    assert_eq!(body["contents"][0]["parts"][0]["text"], proposal_prompt());
    assert_eq!(client.model(), TEST_MODEL);
}

#[tokio::test]
async fn no_candidates_is_absent_text() {
    let server = start_gemini_mock().await;
    mount_json_response(
        &server,
        serde_json::json!({
            "candidates": [],
            "promptFeedback": { "blockReason": "SAFETY" }
        }),
    )
    .await;

    assert_eq!(client_for(&server).generate_text("hola").await, Ok(None));
}

#[tokio::test]
async fn server_error_carries_status_and_message() {
    let server = start_gemini_mock().await;
    mount_error_response(&server, 500, "Internal error encountered.").await;

    let outcome = client_for(&server).generate_text("hola").await;
    assert_eq!(
        outcome,
        Err(GenerationError::Status {
            status: 500,
            detail: "Internal error encountered.".to_string(),
        })
    );
}

#[tokio::test]
async fn rejected_key_is_an_auth_failure() {
    let server = start_gemini_mock().await;
    mount_error_response(&server, 403, "API key not valid. Please pass a valid API key.").await;

    let err = client_for(&server)
        .generate_text("hola")
        .await
        .expect_err("403 fails");
    assert!(err.is_auth());
    assert!(err.to_string().contains("403"));
}

#[tokio::test]
async fn non_json_body_is_malformed() {
    let server = start_gemini_mock().await;
    mount_raw_response(&server, "<html>upstream hiccup</html>").await;

    let outcome = client_for(&server).generate_text("hola").await;
    assert!(matches!(outcome, Err(GenerationError::Malformed(_))));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let server = start_gemini_mock().await;
    let settings = GenerationSettings {
        // Nothing listens on port 1.
        base_url: "http://127.0.0.1:1/v1beta".to_string(),
        ..settings_for(&server)
    };

    let client = GeminiClient::new(&settings).expect("client builds");
    let outcome = client.generate_text("hola").await;
    assert!(matches!(outcome, Err(GenerationError::Transport(_))));
    assert!(!outcome.unwrap_err().is_auth());
}
