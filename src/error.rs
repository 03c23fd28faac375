use reqwest::StatusCode;
use std::time::Duration;

/// Failures reading process configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is not a valid number: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Why a chat-completion call produced no usable reply.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("completion endpoint returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("malformed completion body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("completion response had no choices")]
    NoChoices,

    #[error("first choice had no content")]
    EmptyContent,

    #[error("completion timed out after {0:?}")]
    Timeout(Duration),

    #[error("completion cancelled")]
    Cancelled,
}

impl CompletionError {
    /// The model answered, but with nothing we can send back.
    pub fn is_empty_reply(&self) -> bool {
        matches!(self, CompletionError::EmptyContent)
    }
}

/// Failures talking back to the chat platform.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("discord error: {0}")]
    Discord(#[from] serenity::Error),

    #[error("voice join failed: {0}")]
    Join(#[from] songbird::error::JoinError),

    #[error("voice client was not registered")]
    VoiceUnavailable,

    #[error("voice join timed out after {0:?}")]
    Timeout(Duration),

    #[error("voice join cancelled")]
    Cancelled,
}
