use thiserror::Error;

/// Classified outcome of one call against the GigaChat API.
///
/// Every failure a caller can act on has its own variant; the client never
/// retries on its own, so each of these is terminal for the call that
/// produced it.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Token file absent or holds no usable value. Renewal is done by an
    /// external cron script; nothing to do here but report it.
    #[error("access token not found; run scripts/update_token.sh")]
    CredentialMissing,

    /// Provider rejected the token (HTTP 401). Distinct from
    /// `CredentialMissing` so operators know renewal, not provisioning,
    /// is needed.
    #[error("access token expired or rejected by GigaChat")]
    CredentialExpired,

    /// Provider reported insufficient balance (HTTP 402).
    #[error("GigaChat balance or quota exhausted")]
    QuotaExhausted,

    /// Provider reported a request-rate violation (HTTP 429). The caller
    /// may retry later; this service does not.
    #[error("GigaChat request-rate limit exceeded")]
    RateLimited,

    /// No response within the request-scoped timeout.
    #[error("no response from GigaChat within {0} s")]
    Timeout(u64),

    /// Success status but a body this client cannot interpret as a single
    /// completion choice.
    #[error("unexpected GigaChat response shape: {0}")]
    MalformedResponse(String),

    /// Any other network-level failure (DNS, reset, unclassified status).
    #[error("transport failure: {0}")]
    Transport(String),
}

impl ChatError {
    /// Stable kind label used in logs and assertions; variants stay
    /// distinguishable even when their display text changes.
    pub fn kind(&self) -> &'static str {
        match self {
            ChatError::CredentialMissing => "credential_missing",
            ChatError::CredentialExpired => "credential_expired",
            ChatError::QuotaExhausted => "quota_exhausted",
            ChatError::RateLimited => "rate_limited",
            ChatError::Timeout(_) => "timeout",
            ChatError::MalformedResponse(_) => "malformed_response",
            ChatError::Transport(_) => "transport",
        }
    }
}
