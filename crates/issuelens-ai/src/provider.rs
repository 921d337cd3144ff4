use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

use crate::{
    AnthropicClient, AnthropicConfig, LlmClient, LlmError, OpenAiClient, OpenAiConfig,
};

/// Fixed timeout applied to every completion call, both backends.
pub const COMPLETION_TIMEOUT_MS: u64 = 30_000;

const OPENAI_DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
const ANTHROPIC_DEFAULT_API_BASE: &str = "https://api.anthropic.com/v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Backend selector. Chosen once from configuration; call sites hold an
/// `Arc<dyn LlmClient>` and never branch on the variant.
pub enum Provider {
    OpenAi,
    Anthropic,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported LLM provider: {0}")]
pub struct UnsupportedProviderError(pub String);

impl FromStr for Provider {
    type Err = UnsupportedProviderError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "anthropic" => Ok(Self::Anthropic),
            _ => Err(UnsupportedProviderError(value.to_string())),
        }
    }
}

impl Provider {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
        }
    }

    fn default_api_base(self) -> &'static str {
        match self {
            Self::OpenAi => OPENAI_DEFAULT_API_BASE,
            Self::Anthropic => ANTHROPIC_DEFAULT_API_BASE,
        }
    }

    /// Builds the strategy object for this provider. `api_base` overrides the
    /// production endpoint, which tests point at a local mock server.
    pub fn build_client(
        self,
        api_key: String,
        api_base: Option<String>,
    ) -> Result<Arc<dyn LlmClient>, LlmError> {
        let api_base = api_base.unwrap_or_else(|| self.default_api_base().to_string());
        match self {
            Self::OpenAi => Ok(Arc::new(OpenAiClient::new(OpenAiConfig {
                api_base,
                api_key,
                request_timeout_ms: COMPLETION_TIMEOUT_MS,
            })?)),
            Self::Anthropic => Ok(Arc::new(AnthropicClient::new(AnthropicConfig {
                api_base,
                api_key,
                request_timeout_ms: COMPLETION_TIMEOUT_MS,
            })?)),
        }
    }
}
