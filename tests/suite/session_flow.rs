//! Full session: question, loading, celebration, with a real client

use std::sync::Arc;
use std::time::Duration;

use valentine_engine::{App, InteractionOutcome, ScreenState, UiOptions, Viewport};
use valentine_providers::GeminiClient;
use valentine_types::{FAILURE_FALLBACK, NO_ANSWER_FALLBACK, ScriptedRandom};
use wiremock::MockServer;

use crate::common::{
    mount_error_response, mount_json_response, mount_text_response, settings_for,
    start_gemini_mock,
};

const STEP: Duration = Duration::from_millis(10);

fn app_for(server: &MockServer) -> App {
    let client = GeminiClient::new(&settings_for(server)).expect("client builds");
    let mut app = App::with_random(
        Arc::new(client),
        UiOptions::default(),
        Box::new(ScriptedRandom::constant(0.25)),
    );
    app.set_viewport(Viewport::new(800.0, 480.0));
    app
}

/// Drive the app in real time until it leaves the loading screen.
async fn run_until_celebration(app: &mut App) {
    for _ in 0..500 {
        if app.screen() == ScreenState::Celebration {
            return;
        }
        tokio::time::sleep(STEP).await;
        app.advance(STEP);
    }
    panic!("still on {:?} after 5s", app.screen());
}

#[tokio::test]
async fn accepting_shows_the_generated_message() {
    let server = start_gemini_mock().await;
    mount_text_response(&server, "\n  Gina, amb tu cada dia és Sant Valentí.  \n").await;
    let mut app = app_for(&server);

    assert_eq!(app.attempt_interaction(), InteractionOutcome::Evaded);
    assert_eq!(app.attempt_interaction(), InteractionOutcome::Evaded);
    assert_eq!(app.session().evasion().interaction_count(), 2);

    assert_eq!(app.confirm_affirmative(), InteractionOutcome::Accepted);
    assert_eq!(app.screen(), ScreenState::Loading);
    assert!(app.is_generating());

    run_until_celebration(&mut app).await;
    assert_eq!(
        app.session().message(),
        "Gina, amb tu cada dia és Sant Valentí."
    );
    assert!(!app.is_generating());

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn api_failure_shows_the_failure_fallback() {
    let server = start_gemini_mock().await;
    mount_error_response(&server, 500, "backend unavailable").await;
    let mut app = app_for(&server);

    app.confirm_affirmative();
    run_until_celebration(&mut app).await;
    assert_eq!(app.session().message(), FAILURE_FALLBACK);
}

#[tokio::test]
async fn empty_answer_shows_the_no_answer_fallback() {
    let server = start_gemini_mock().await;
    mount_json_response(
        &server,
        serde_json::json!({ "candidates": [{ "content": { "parts": [{ "text": "   " }] } }] }),
    )
    .await;
    let mut app = app_for(&server);

    app.confirm_affirmative();
    run_until_celebration(&mut app).await;
    assert_eq!(app.session().message(), NO_ANSWER_FALLBACK);
}

#[tokio::test]
async fn celebration_fires_confetti_then_stops() {
    let server = start_gemini_mock().await;
    mount_text_response(&server, "T'estimo").await;
    let mut app = app_for(&server);

    app.confirm_affirmative();
    assert_eq!(app.take_confetti().len(), 1, "acceptance burst");

    run_until_celebration(&mut app).await;
    app.advance(Duration::from_millis(250));
    assert_eq!(app.take_confetti().len(), 2, "one burst from each side");

    app.advance(Duration::from_secs(15));
    assert!(app.celebration().is_some_and(|c| c.is_finished()));
    app.take_confetti();
    app.advance(Duration::from_secs(1));
    assert!(app.take_confetti().is_empty());
}

#[tokio::test]
async fn quitting_mid_request_cancels_it() {
    let server = start_gemini_mock().await;
    mount_text_response(&server, "never shown").await;
    let mut app = app_for(&server);

    app.confirm_affirmative();
    app.teardown();
    assert!(!app.is_generating());
    assert!(app.is_torn_down());

    tokio::time::sleep(Duration::from_millis(50)).await;
    app.advance(STEP);
    assert_eq!(app.screen(), ScreenState::Loading);
    assert_eq!(app.session().message(), "");
}
