use issuelens_github::GithubIssue;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Normalized issue row as persisted by the scan pipeline and consumed by the
/// analyze pipeline. Fields absent upstream default to empty equivalents.
pub struct IssueRecord {
    pub repo: String,
    pub issue_id: u64,
    pub issue_number: u64,
    pub title: String,
    pub body: String,
    pub html_url: String,
    pub created_at: String,
    pub updated_at: String,
    pub labels: Vec<String>,
    pub state: String,
    pub cached_at: String,
}

impl IssueRecord {
    /// Normalizes a raw GitHub issue into the persisted shape. A missing body
    /// becomes an empty string and labels collapse to their names, in order.
    pub fn from_github(repo: &str, issue: &GithubIssue, cached_at: &str) -> Self {
        Self {
            repo: repo.to_string(),
            issue_id: issue.id,
            issue_number: issue.number,
            title: issue.title.clone(),
            body: issue.body.clone().unwrap_or_default(),
            html_url: issue.html_url.clone(),
            created_at: issue.created_at.clone(),
            updated_at: issue.updated_at.clone(),
            labels: issue.labels.iter().map(|label| label.name.clone()).collect(),
            state: issue.state.clone(),
            cached_at: cached_at.to_string(),
        }
    }
}
