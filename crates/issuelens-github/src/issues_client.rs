use std::time::Duration;

use crate::{GithubError, GithubIssue, RepoRef};

/// Maximum rows per listing page; a short or empty page ends pagination.
pub const GITHUB_PAGE_SIZE: usize = 100;

/// Listing calls carry a tighter bound than LLM completions.
pub const GITHUB_REQUEST_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone)]
/// Authenticated client for the GitHub issues listing API.
pub struct GithubIssuesClient {
    http: reqwest::Client,
    api_base: String,
}

impl GithubIssuesClient {
    pub fn new(api_base: &str, token: &str) -> Result<Self, GithubError> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("issuelens"),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            reqwest::header::HeaderValue::from_static("2022-11-28"),
        );
        let auth_header = format!("Bearer {}", token.trim());
        headers.insert(
            reqwest::header::AUTHORIZATION,
            reqwest::header::HeaderValue::from_str(&auth_header)
                .map_err(|e| GithubError::Configuration(format!("invalid token header: {e}")))?,
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(GITHUB_REQUEST_TIMEOUT_MS))
            .build()?;

        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    /// Pages through every open issue of `repo`, newest first, and returns
    /// the accumulated rows. Pagination stops at the first empty or short
    /// page.
    pub async fn list_open_issues(&self, repo: &RepoRef) -> Result<Vec<GithubIssue>, GithubError> {
        let url = format!(
            "{}/repos/{}/{}/issues",
            self.api_base, repo.owner, repo.name
        );
        let per_page = GITHUB_PAGE_SIZE.to_string();

        let mut page = 1_u32;
        let mut rows = Vec::new();
        loop {
            tracing::info!(repo = %repo.as_repo_string(), page, "fetching issue page");
            let response = self
                .http
                .get(&url)
                .query(&[
                    ("state", "open"),
                    ("per_page", per_page.as_str()),
                    ("page", page.to_string().as_str()),
                    ("sort", "created"),
                    ("direction", "desc"),
                ])
                .send()
                .await?;

            let status = response.status();
            let raw = response.text().await?;
            if !status.is_success() {
                return Err(GithubError::HttpStatus {
                    status: status.as_u16(),
                    body: raw,
                });
            }

            let chunk: Vec<GithubIssue> = serde_json::from_str(&raw)?;
            let chunk_len = chunk.len();
            rows.extend(chunk);
            if chunk_len < GITHUB_PAGE_SIZE {
                break;
            }
            page = page.saturating_add(1);
        }

        tracing::info!(
            repo = %repo.as_repo_string(),
            issues = rows.len(),
            "issue listing complete"
        );
        Ok(rows)
    }
}
