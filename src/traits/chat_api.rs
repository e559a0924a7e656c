use async_trait::async_trait;

use crate::models::error::ChatError;
use crate::models::types::ConversationRequest;

/// Defines the interface to a chat-completion backend.
///
/// This trait allows consumers to abstract over different implementations
/// (the real GigaChat client, mocks for testing).
///
/// Any implementation must be thread-safe (`Send + Sync`): one instance is
/// built at startup and shared across all concurrent request handlers.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Executes one conversation turn and returns the completion text.
    ///
    /// Every failure is returned as a classified [`ChatError`]; there is no
    /// internal retry, a failure is terminal for that call.
    async fn chat(&self, request: &ConversationRequest) -> Result<String, ChatError>;

    /// Lightweight probe of the current credential against the provider.
    ///
    /// Collapses every failure mode (missing token, auth rejection, network,
    /// timeout) into `false`. The only consumer is the health endpoint's
    /// binary signal, so the detail loss is deliberate and must not spread
    /// into the `chat` path.
    async fn is_credential_valid(&self) -> bool;
}
