//! Integration tests for configuration loader
//!
//! Tests loading configuration from files and driving a session with it.

use std::io::Write;
use std::sync::Arc;

use restsdk_common::clock::SystemClock;
use restsdk_domain::constants::SDK_VERSION;
use restsdk_domain::SdkError;
use restsdk_infra::{config, HttpClient, Session};
use tempfile::{Builder, NamedTempFile};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_file(suffix: &str, contents: &str) -> NamedTempFile {
    let mut temp_file =
        Builder::new().suffix(suffix).tempfile().expect("Failed to create temp file");
    temp_file.write_all(contents.as_bytes()).expect("Failed to write to temp file");
    temp_file
}

#[test]
fn test_load_config_from_toml_file() {
    let temp_file = config_file(
        ".toml",
        r#"
app_key = "toml-key"
app_secret = "toml-secret"
server_url = "https://platform.devtest.ringcentral.com"
app_name = "call-monitor"
app_version = "2.1.0"
timeout_secs = 15

[token_ttl]
access_token_ttl = 1800
refresh_token_ttl = 7200
remember_me_refresh_token_ttl = 86400
"#,
    );

    let config = config::load_from_file(Some(temp_file.path().to_path_buf()))
        .expect("Failed to load config from TOML file");

    assert_eq!(config.app_key, "toml-key");
    assert_eq!(config.timeout_secs, 15);
    assert_eq!(config.token_ttl.refresh_ttl_for(false), 7200);
    assert_eq!(config.token_ttl.refresh_ttl_for(true), 86400);
    assert!(config.user_agent().starts_with("call-monitor/2.1.0 restsdk/"));
}

#[test]
fn test_load_config_with_minimal_fields() {
    let temp_file = config_file(
        ".json",
        r#"{
            "app_key": "json-key",
            "app_secret": "json-secret",
            "server_url": "https://platform.ringcentral.com"
        }"#,
    );

    let config = config::load_from_file(Some(temp_file.path().to_path_buf()))
        .expect("Failed to load config with minimal fields");

    assert_eq!(config.timeout_secs, 30);
    assert_eq!(config.token_ttl.access_token_ttl, 3600);
    assert_eq!(config.token_ttl.refresh_ttl_for(false), 36000);
    assert_eq!(config.token_ttl.refresh_ttl_for(true), 604_800);
}

#[test]
fn test_load_config_from_nonexistent_file() {
    let result = config::load_from_file(Some("/nonexistent/path/restsdk.json".into()));

    match result {
        Err(SdkError::Config(msg)) => {
            assert!(msg.contains("not found"), "Error message should mention 'not found'");
        }
        other => panic!("Expected Config error, got {other:?}"),
    }
}

#[test]
fn test_load_config_with_invalid_format() {
    let temp_file = config_file(".json", r#"{ "this is": "not valid" "#);

    match config::load_from_file(Some(temp_file.path().to_path_buf())) {
        Err(SdkError::Config(msg)) => {
            assert!(msg.contains("Invalid JSON"), "Error message should mention invalid JSON");
        }
        other => panic!("Expected Config error, got {other:?}"),
    }
}

#[test]
fn test_load_config_rejects_non_http_server_url() {
    let temp_file = config_file(
        ".toml",
        "app_key = \"k\"\napp_secret = \"s\"\nserver_url = \"ftp://platform.example.com\"\n",
    );

    assert!(matches!(
        config::load_from_file(Some(temp_file.path().to_path_buf())),
        Err(SdkError::Config(_))
    ));
}

#[tokio::test]
async fn test_file_config_drives_token_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/restapi/oauth/token"))
        .and(header("user-agent", format!("call-monitor/2.1.0 restsdk/{SDK_VERSION}").as_str()))
        .and(body_string_contains("access_token_ttl=1800"))
        .and(body_string_contains("refresh_token_ttl=7200"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "at",
            "refresh_token": "rt",
            "expires_in": 1800,
            "refresh_token_expires_in": 7200
        })))
        .expect(1)
        .mount(&server)
        .await;

    let temp_file = config_file(
        ".toml",
        &format!(
            r#"
app_key = "key"
app_secret = "secret"
server_url = "{}"
app_name = "call-monitor"
app_version = "2.1.0"

[token_ttl]
access_token_ttl = 1800
refresh_token_ttl = 7200
"#,
            server.uri()
        ),
    );
    let config = config::load_from_file(Some(temp_file.path().to_path_buf())).unwrap();

    let http = HttpClient::builder().user_agent(config.user_agent()).no_proxy().build().unwrap();
    let session = Session::from_parts(config, http, Arc::new(SystemClock));

    session.authenticate("user", "secret", None, false).await.unwrap();
    assert!(session.is_authorized().await);
}
