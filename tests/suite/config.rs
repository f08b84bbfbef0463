//! Config file to working client

use std::io::Write;

use valentine_config::ValentineConfig;
use valentine_providers::GeminiClient;

use crate::common::{TEST_API_KEY, TEST_MODEL, mount_text_response, start_gemini_mock};

#[tokio::test]
async fn config_file_drives_the_client() {
    let server = start_gemini_mock().await;
    mount_text_response(&server, "Des del fitxer de configuració").await;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "[app]\nreduced_motion = true\n\n[google]\napi_key = \"${{LOVE_KEY}}\"\nmodel = \"{TEST_MODEL}\"\nbase_url = \"{}/\"\ntimeout_secs = 5\n",
        server.uri()
    )
    .unwrap();

    let config = ValentineConfig::load_from(file.path()).unwrap().unwrap();
    assert!(config.ui_options().reduced_motion);
    assert!(!config.ui_options().ascii_only);

    let settings = ValentineConfig::generation_settings_with(Some(&config), |var| {
        (var == "LOVE_KEY").then(|| TEST_API_KEY.to_string())
    });
    assert_eq!(settings.api_key.as_deref(), Some(TEST_API_KEY));
    assert_eq!(settings.base_url, server.uri());

    let client = GeminiClient::new(&settings).unwrap();
    assert_eq!(
        client.generate_text("hola").await,
        Ok(Some("Des del fitxer de configuració".to_string()))
    );
}

#[tokio::test]
async fn environment_key_wins_over_file_key() {
    let server = start_gemini_mock().await;
    mount_text_response(&server, "ok").await;

    let config = ValentineConfig::parse(&format!(
        "[google]\napi_key = \"stale-key\"\nbase_url = \"{}\"\n",
        server.uri()
    ))
    .unwrap();
    let settings = ValentineConfig::generation_settings_with(Some(&config), |var| {
        (var == "GEMINI_API_KEY").then(|| TEST_API_KEY.to_string())
    });

    // The mock only answers requests carrying the test key.
    let client = GeminiClient::new(&settings).unwrap();
    assert_eq!(client.generate_text("hola").await, Ok(Some("ok".to_string())));
}

#[test]
fn broken_config_reports_its_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[google]\nmodel = 42").unwrap();

    let err = ValentineConfig::load_from(file.path()).unwrap_err();
    assert_eq!(err.path(), file.path());
}
