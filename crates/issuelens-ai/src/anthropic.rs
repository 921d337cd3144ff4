use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{CompletionRequest, LlmClient, LlmError};

#[derive(Debug, Clone)]
/// Connection settings for the Anthropic messages backend.
pub struct AnthropicConfig {
    pub api_base: String,
    pub api_key: String,
    pub request_timeout_ms: u64,
}

#[derive(Debug, Clone)]
/// Messages-style backend: a single user message in, the first text content
/// block out.
pub struct AnthropicClient {
    client: reqwest::Client,
    config: AnthropicConfig,
}

impl AnthropicClient {
    pub fn new(config: AnthropicConfig) -> Result<Self, LlmError> {
        if config.api_key.trim().is_empty() {
            return Err(LlmError::MissingApiKey);
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(config.api_key.trim()).map_err(|e| {
                LlmError::InvalidResponse(format!("invalid API key header: {e}"))
            })?,
        );
        headers.insert("anthropic-version", HeaderValue::from_static("2023-06-01"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_millis(
                config.request_timeout_ms.max(1),
            ))
            .build()?;

        Ok(Self { client, config })
    }

    fn messages_url(&self) -> String {
        let base = self.config.api_base.trim_end_matches('/');
        if base.ends_with("/messages") {
            return base.to_string();
        }

        format!("{base}/messages")
    }
}

#[async_trait]
impl LlmClient for AnthropicClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        let body = build_messages_request_body(&request);
        let url = self.messages_url();

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();
        let raw = response.text().await?;
        if !status.is_success() {
            return Err(LlmError::HttpStatus {
                status: status.as_u16(),
                body: raw,
            });
        }

        parse_messages_response(&raw)
    }
}

fn build_messages_request_body(request: &CompletionRequest) -> Value {
    let mut body = json!({
        "model": request.model,
        "max_tokens": request.max_tokens,
        "messages": [
            { "role": "user", "content": request.user }
        ],
    });

    if let Some(system) = request.system.as_deref() {
        if !system.is_empty() {
            body["system"] = json!(system);
        }
    }

    body
}

fn parse_messages_response(raw: &str) -> Result<String, LlmError> {
    let parsed: AnthropicMessageResponse = serde_json::from_str(raw)?;

    parsed
        .content
        .into_iter()
        .find_map(|block| match block {
            AnthropicContent::Text { text } => Some(text),
            AnthropicContent::Other => None,
        })
        .ok_or_else(|| LlmError::InvalidResponse("response contained no text block".to_string()))
}

#[derive(Debug, Deserialize)]
struct AnthropicMessageResponse {
    content: Vec<AnthropicContent>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum AnthropicContent {
    Text { text: String },
    #[serde(other)]
    Other,
}
