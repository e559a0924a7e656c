use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, info};

use crate::models::config::{DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_TOKEN_FILE, GigaChatConfig};
use crate::models::error::ChatError;
use crate::models::types::ConversationRequest;
use crate::services::token_store::TokenStore;
use crate::traits::chat_api::ChatApi;

/// Client for the GigaChat chat-completions API.
///
/// Stateless between calls: the token is re-read from the store on every
/// invocation and no response data is kept, so a single instance is safe to
/// share across concurrent request handlers.
pub struct GigaChatClient {
    client: Client,
    base_url: String,
    token_store: TokenStore,
    timeout_secs: u64,
}

impl GigaChatClient {
    /// Builds the client once at the composition root. A failure here is a
    /// bootstrap problem, not one of the per-call failure kinds.
    pub fn from_config(
        cfg: &GigaChatConfig,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let timeout_secs = cfg
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        // GigaChat terminates TLS with a certificate that does not chain to
        // a public root (Russian Trusted Root CA). Chain verification is
        // skipped for this one client instance, which talks to no other
        // endpoint; this is not a global TLS policy.
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .danger_accept_invalid_certs(true)
            .build()?;

        let token_file = cfg
            .token_file
            .clone()
            .unwrap_or_else(|| DEFAULT_TOKEN_FILE.to_string());

        Ok(Self {
            client,
            base_url: cfg.resolved_base_url().trim_end_matches('/').to_string(),
            token_store: TokenStore::new(token_file),
            timeout_secs,
        })
    }

    fn classify_send_error(&self, e: reqwest::Error) -> ChatError {
        if e.is_timeout() {
            ChatError::Timeout(self.timeout_secs)
        } else {
            ChatError::Transport(e.to_string())
        }
    }
}

#[async_trait]
impl ChatApi for GigaChatClient {
    async fn chat(&self, request: &ConversationRequest) -> Result<String, ChatError> {
        // Missing token fails the call before any network activity.
        let token = self.token_store.read_token()?;

        let url = format!("{}/chat/completions", self.base_url);
        let body = serde_json::json!({
            "model": request.model,
            "messages": request.messages(),
            "temperature": request.temperature,
            "max_tokens": request.max_tokens,
        });

        info!(
            model = %request.model,
            user_len = request.user_message.len(),
            has_system = request.system_prompt.is_some(),
            "gigachat: chat request"
        );

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.classify_send_error(e))?;

        // Status is classified before the body is touched; only a success
        // status proceeds to parsing.
        match resp.status() {
            StatusCode::UNAUTHORIZED => return Err(ChatError::CredentialExpired),
            StatusCode::PAYMENT_REQUIRED => return Err(ChatError::QuotaExhausted),
            StatusCode::TOO_MANY_REQUESTS => return Err(ChatError::RateLimited),
            _ => {}
        }

        let status = resp.status();
        let raw = resp
            .text()
            .await
            .map_err(|e| ChatError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(ChatError::Transport(format!(
                "GigaChat returned status {}: {}",
                status.as_u16(),
                raw
            )));
        }

        let v: Value = serde_json::from_str(&raw)
            .map_err(|e| ChatError::MalformedResponse(format!("json parse failed: {e}")))?;

        let text = v
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .ok_or_else(|| {
                ChatError::MalformedResponse("missing choices[0].message.content".to_string())
            })?;

        info!(response_len = text.len(), "gigachat: chat response");
        Ok(text.to_string())
    }

    async fn is_credential_valid(&self) -> bool {
        let Ok(token) = self.token_store.read_token() else {
            return false;
        };

        let url = format!("{}/models", self.base_url);
        match self.client.get(&url).bearer_auth(&token).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                debug!(error = %e, "gigachat: model probe failed");
                false
            }
        }
    }
}
