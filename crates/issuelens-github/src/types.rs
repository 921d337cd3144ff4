use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Deserialize, Serialize)]
/// Raw issue row as returned by the GitHub issues listing API. Only the
/// fields the cache keeps are deserialized; everything else is dropped.
pub struct GithubIssue {
    pub id: u64,
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    pub html_url: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub labels: Vec<GithubLabel>,
    pub state: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
/// Label attached to a raw GitHub issue.
pub struct GithubLabel {
    pub name: String,
}

#[derive(Debug, Error)]
/// Enumerates supported `GithubError` values.
pub enum GithubError {
    #[error("invalid repo format: {repo}. Expected 'owner/repo-name'")]
    InvalidRepo { repo: String },
    #[error("invalid github client configuration: {0}")]
    Configuration(String),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("github returned non-success status {status}: {body}")]
    HttpStatus { status: u16, body: String },
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl GithubError {
    /// True when the remote issue source failed, as opposed to bad input or
    /// local configuration.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Http(_) | Self::HttpStatus { .. } | Self::Serde(_))
    }
}
