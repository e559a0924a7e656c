pub mod html;

use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use bon::Builder;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::models::config::{
    DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE, GigaChatConfig,
};
use crate::models::error::ChatError;
use crate::models::types::ConversationRequest;
use crate::traits::chat_api::ChatApi;

/// Shared state of the REST front door: the one chat client instance plus
/// request defaults taken from config at startup.
#[derive(Clone, Builder)]
pub struct AppState {
    pub chat_api: Arc<dyn ChatApi>,
    pub defaults: RequestDefaults,
}

/// Generation parameters applied when the caller omits them.
#[derive(Debug, Clone, Builder)]
pub struct RequestDefaults {
    #[builder(default = DEFAULT_MODEL.to_string())]
    pub model: String,
    pub system_prompt: Option<String>,
    #[builder(default = DEFAULT_TEMPERATURE)]
    pub temperature: f32,
    #[builder(default = DEFAULT_MAX_TOKENS)]
    pub max_tokens: u32,
}

impl RequestDefaults {
    pub fn from_config(cfg: &GigaChatConfig) -> Self {
        Self::builder()
            .model(cfg.model.clone().unwrap_or_else(|| DEFAULT_MODEL.to_string()))
            .maybe_system_prompt(cfg.system_prompt.clone())
            .temperature(cfg.temperature.unwrap_or(DEFAULT_TEMPERATURE))
            .max_tokens(cfg.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS))
            .build()
    }
}

/// Body of `POST /analyze/text`.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
    pub system_prompt: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub return_format: ReturnFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReturnFormat {
    #[default]
    Text,
    Html,
}

/// Stable reply envelope consumed by the calling business application.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub result: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/analyze/text", post(analyze_text))
        .with_state(state)
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": "gigabridge",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Health of the service and of the GigaChat credential. The probe collapses
/// every failure mode into the single boolean; see `ChatApi::is_credential_valid`.
async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let gigachat_ok = state.chat_api.is_credential_valid().await;
    let status = if gigachat_ok { "ok" } else { "degraded" };
    Json(serde_json::json!({ "status": status, "gigachat": gigachat_ok }))
}

async fn analyze_text(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> (StatusCode, Json<AnalyzeResponse>) {
    // Boundary validation; the chat client trusts these invariants.
    if let Err(reason) = validate(&req) {
        return reply(StatusCode::BAD_REQUEST, String::new(), Some(reason));
    }

    let request = ConversationRequest::builder()
        .user_message(req.text)
        .maybe_system_prompt(
            req.system_prompt
                .or_else(|| state.defaults.system_prompt.clone()),
        )
        .model(req.model.unwrap_or_else(|| state.defaults.model.clone()))
        .temperature(req.temperature.unwrap_or(state.defaults.temperature))
        .max_tokens(req.max_tokens.unwrap_or(state.defaults.max_tokens))
        .build();

    match state.chat_api.chat(&request).await {
        Ok(text) => {
            info!(result_len = text.len(), format = ?req.return_format, "analyze: ok");
            let result = match req.return_format {
                ReturnFormat::Html => html::render_page(&text),
                ReturnFormat::Text => text,
            };
            reply(StatusCode::OK, result, None)
        }
        Err(e) => {
            error!(kind = e.kind(), error = %e, "analyze: chat call failed");
            reply(status_for(&e), String::new(), Some(e.to_string()))
        }
    }
}

fn validate(req: &AnalyzeRequest) -> Result<(), String> {
    if req.text.trim().is_empty() {
        return Err("text must not be empty".to_string());
    }
    if let Some(t) = req.temperature {
        if !(0.0..=2.0).contains(&t) {
            return Err(format!("temperature {t} outside [0, 2]"));
        }
    }
    if req.max_tokens == Some(0) {
        return Err("max_tokens must be positive".to_string());
    }
    Ok(())
}

/// Transport-level mapping of the classified failure kinds.
fn status_for(err: &ChatError) -> StatusCode {
    match err {
        ChatError::CredentialMissing | ChatError::CredentialExpired => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        ChatError::QuotaExhausted => StatusCode::PAYMENT_REQUIRED,
        ChatError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        ChatError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        ChatError::Transport(_) => StatusCode::BAD_GATEWAY,
        ChatError::MalformedResponse(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn reply(
    status: StatusCode,
    result: String,
    error: Option<String>,
) -> (StatusCode, Json<AnalyzeResponse>) {
    (
        status,
        Json(AnalyzeResponse {
            success: error.is_none(),
            result,
            error,
        }),
    )
}
