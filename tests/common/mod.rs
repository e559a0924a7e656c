use assert_fs::TempDir;
use assert_fs::prelude::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gigabridge::models::config::GigaChatConfig;
use gigabridge::services::gigachat::GigaChatClient;

pub const TEST_TOKEN: &str = "test-token-0123456789";

/// Writes a cron-style token file and returns the tempdir owning it
/// together with the file path.
pub fn write_token_file(token: &str) -> (TempDir, String) {
    let dir = TempDir::new().unwrap();
    let file = dir.child(".env.tokens");
    file.write_str(&format!(
        "# updated by scripts/update_token.sh\nGIGACHAT_ACCESS_TOKEN={token}\n"
    ))
    .unwrap();
    let path = file.path().to_str().unwrap().to_string();
    (dir, path)
}

pub fn client_for(base_url: &str, token_file: &str) -> GigaChatClient {
    client_with_timeout(base_url, token_file, 5)
}

pub fn client_with_timeout(base_url: &str, token_file: &str, timeout_secs: u64) -> GigaChatClient {
    let cfg = GigaChatConfig {
        base_url: Some(base_url.to_string()),
        token_file: Some(token_file.to_string()),
        request_timeout_secs: Some(timeout_secs),
        ..Default::default()
    };
    GigaChatClient::from_config(&cfg).unwrap()
}

pub fn completion_body(text: &str) -> serde_json::Value {
    serde_json::json!({
        "choices": [
            { "message": { "role": "assistant", "content": text } }
        ]
    })
}

pub async fn mount_chat_completion(server: &MockServer, status: u16, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mount_chat_status(server: &MockServer, status: u16) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

pub async fn mount_models(server: &MockServer, status: u16) {
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(status).set_body_json(serde_json::json!({
            "data": [ { "id": "GigaChat" }, { "id": "GigaChat-Pro" } ]
        })))
        .mount(server)
        .await;
}
