use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::models::config::{DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE};

/// Role tag for a single turn in the conversation sent to GigaChat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One role-tagged entry of the chat-completions payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// A single conversation turn submitted by a caller.
///
/// Constructed per call and consumed synchronously; nothing here is
/// persisted. `user_message` must be non-empty and `temperature` /
/// `max_tokens` in range: the HTTP boundary validates, the client trusts.
#[derive(Debug, Clone, Builder)]
pub struct ConversationRequest {
    pub user_message: String,
    pub system_prompt: Option<String>,
    #[builder(default = DEFAULT_MODEL.to_string())]
    pub model: String,
    #[builder(default = DEFAULT_TEMPERATURE)]
    pub temperature: f32,
    #[builder(default = DEFAULT_MAX_TOKENS)]
    pub max_tokens: u32,
}

impl ConversationRequest {
    /// Ordered wire messages: the system turn, when present and non-empty,
    /// always precedes the single user turn. An empty system prompt is
    /// treated as absent.
    pub fn messages(&self) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = self
            .system_prompt
            .as_deref()
            .filter(|s| !s.trim().is_empty())
        {
            messages.push(ChatMessage {
                role: Role::System,
                content: system.to_string(),
            });
        }
        messages.push(ChatMessage {
            role: Role::User,
            content: self.user_message.clone(),
        });
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn system_turn_precedes_user_turn() {
        let req = ConversationRequest::builder()
            .user_message("Hello".to_string())
            .system_prompt("Answer briefly".to_string())
            .build();
        let messages = req.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[0].content, "Answer briefly");
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[1].content, "Hello");
    }

    #[test]
    fn empty_system_prompt_sends_only_user_turn() {
        let req = ConversationRequest::builder()
            .user_message("Hello".to_string())
            .system_prompt(String::new())
            .build();
        let messages = req.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, Role::User);
    }

    #[test]
    fn roles_serialize_lowercase() {
        let msg = ChatMessage {
            role: Role::System,
            content: "x".to_string(),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "system");
    }

    #[test]
    fn builder_defaults_match_provider_baseline() {
        let req = ConversationRequest::builder()
            .user_message("Hello".to_string())
            .build();
        assert_eq!(req.model, "GigaChat");
        assert_eq!(req.temperature, 0.7);
        assert_eq!(req.max_tokens, 2048);
        assert!(req.system_prompt.is_none());
    }
}
