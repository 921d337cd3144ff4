use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
/// One completion call: an optional system instruction plus a single user
/// message. Both backends accept this shape; request/response wire formats
/// are an adapter detail.
pub struct CompletionRequest {
    pub model: String,
    pub system: Option<String>,
    pub user: String,
    pub max_tokens: u32,
}

#[derive(Debug, Error)]
/// Enumerates supported `LlmError` values.
pub enum LlmError {
    #[error("missing API key")]
    MissingApiKey,
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider returned non-success status {status}: {body}")]
    HttpStatus { status: u16, body: String },
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl LlmError {
    /// True when the failure originated upstream (transport, timeout, or a
    /// non-success provider status) rather than in local request handling.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Http(_) | Self::HttpStatus { .. })
    }
}

#[async_trait]
/// Trait contract for completion backends.
pub trait LlmClient: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError>;
}
