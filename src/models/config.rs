use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Production chat-completions endpoint of GigaChat.
pub const DEFAULT_BASE_URL: &str = "https://gigachat.devices.sberbank.ru/api/v1";
pub const DEFAULT_MODEL: &str = "GigaChat";
pub const DEFAULT_TOKEN_FILE: &str = ".env.tokens";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 2048;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    pub server: Option<ServerConfig>,
    #[serde(default)]
    pub gigachat: GigaChatConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub bind_addr: Option<String>, // default 0.0.0.0:8000
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct GigaChatConfig {
    pub base_url: Option<String>,
    /// Path to the token file maintained by the external renewal cron job.
    pub token_file: Option<String>,
    pub model: Option<String>,
    /// Instruction turn prepended to every request that does not carry
    /// its own system prompt.
    pub system_prompt: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub request_timeout_secs: Option<u64>,
}

impl GigaChatConfig {
    /// Endpoint resolution order: explicit config, then the
    /// `GIGACHAT_API_URL` environment variable, then production.
    pub fn resolved_base_url(&self) -> String {
        self.base_url
            .clone()
            .or_else(|| std::env::var("GIGACHAT_API_URL").ok())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }
}

pub fn load_config<P: AsRef<Path>>(
    path: P,
) -> Result<AppConfig, Box<dyn std::error::Error + Send + Sync>> {
    let content = fs::read_to_string(path)?;
    let cfg: AppConfig = serde_yaml::from_str(&content)?;
    Ok(cfg)
}
