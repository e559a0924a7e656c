pub mod models;
pub mod server;
pub mod services;
pub mod traits;

use std::sync::Arc;

use tracing::info;

use crate::models::config::{AppConfig, load_config};
use crate::server::{AppState, RequestDefaults};
use crate::services::gigachat::GigaChatClient;
use crate::traits::chat_api::ChatApi;

/// High-level entrypoint: load config, init logging, start the front door.
pub async fn run_with_config_path(path: &str) -> std::io::Result<()> {
    let cfg: AppConfig = load_config(path).map_err(|e| {
        std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("Failed to load {}: {}", path, e),
        )
    })?;

    // Initialize structured logging (default to info if RUST_LOG not set)
    let log_spec = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(log_spec))
        .with_target(false)
        .compact()
        .try_init();

    run_server(cfg).await
}

/// Builds the one shared GigaChat client and serves the REST front door.
///
/// The client is constructed here, at the composition root, and handed to
/// the handlers through [`AppState`]; nothing holds it as a global.
pub async fn run_server(cfg: AppConfig) -> std::io::Result<()> {
    let chat_api: Arc<dyn ChatApi> = Arc::new(
        GigaChatClient::from_config(&cfg.gigachat)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?,
    );

    let state = AppState::builder()
        .chat_api(chat_api)
        .defaults(RequestDefaults::from_config(&cfg.gigachat))
        .build();

    let bind_addr = cfg
        .server
        .as_ref()
        .and_then(|s| s.bind_addr.clone())
        .unwrap_or_else(|| "0.0.0.0:8000".to_string());

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(addr = %bind_addr, "gigabridge listening");
    axum::serve(listener, server::router(state)).await
}
