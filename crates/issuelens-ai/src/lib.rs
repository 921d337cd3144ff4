//! LLM completion clients for issue analysis.
//!
//! Exposes one capability trait, [`LlmClient`], with two interchangeable
//! backends: an OpenAI-style chat-completions client and an Anthropic-style
//! messages client. Backend choice is a configuration-time decision made once
//! through [`Provider`]; call sites never branch on the provider.

mod anthropic;
mod openai;
mod provider;
mod types;

pub use anthropic::{AnthropicClient, AnthropicConfig};
pub use openai::{OpenAiClient, OpenAiConfig};
pub use provider::{Provider, UnsupportedProviderError, COMPLETION_TIMEOUT_MS};
pub use types::{CompletionRequest, LlmClient, LlmError};
