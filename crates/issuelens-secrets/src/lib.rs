//! HTTP secret-store client.
//!
//! Credentials (the GitHub token and the LLM API key) live in an external
//! secret service as named JSON documents. A secret is fetched by name and a
//! string value is read from a known field; a secret-store failure is an
//! unexpected error at the gateway, never a validation or upstream one.

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

const SECRETS_REQUEST_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Error)]
/// Enumerates supported `SecretsError` values.
pub enum SecretsError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("secret store returned non-success status {status}: {body}")]
    HttpStatus { status: u16, body: String },
    #[error("secret document is not a JSON object: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("secret '{secret}' has no value under any of the fields {fields:?}")]
    MissingField {
        secret: String,
        fields: Vec<String>,
    },
}

#[derive(Debug, Clone)]
/// Client for the secret service. Initialized once per process and shared.
pub struct SecretsClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Clone)]
/// A named secret's JSON document.
pub struct SecretDocument {
    name: String,
    value: Value,
}

impl SecretsClient {
    pub fn new(base_url: &str) -> Result<Self, SecretsError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(SECRETS_REQUEST_TIMEOUT_MS))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetches the named secret document.
    pub async fn fetch(&self, name: &str) -> Result<SecretDocument, SecretsError> {
        let url = format!("{}/v1/secret/{name}", self.base_url);
        let response = self.http.get(&url).send().await?;
        let status = response.status();
        let raw = response.text().await?;
        if !status.is_success() {
            return Err(SecretsError::HttpStatus {
                status: status.as_u16(),
                body: raw,
            });
        }

        let value: Value = serde_json::from_str(&raw)?;
        Ok(SecretDocument {
            name: name.to_string(),
            value,
        })
    }
}

impl SecretDocument {
    /// Returns the first non-empty string value found under `fields`, in
    /// order. Documents may carry the credential under more than one field
    /// name; callers list the ones they accept.
    pub fn field(&self, fields: &[&str]) -> Result<String, SecretsError> {
        for field in fields {
            if let Some(text) = self.value.get(field).and_then(Value::as_str) {
                if !text.trim().is_empty() {
                    return Ok(text.to_string());
                }
            }
        }

        Err(SecretsError::MissingField {
            secret: self.name.clone(),
            fields: fields.iter().map(ToString::to_string).collect(),
        })
    }
}
