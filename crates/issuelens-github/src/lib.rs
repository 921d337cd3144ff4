//! GitHub issue ingestion: repository identifier validation and the paginated
//! open-issue listing client.

mod issues_client;
mod repo_ref;
mod types;

pub use issues_client::{GithubIssuesClient, GITHUB_PAGE_SIZE, GITHUB_REQUEST_TIMEOUT_MS};
pub use repo_ref::RepoRef;
pub use types::{GithubError, GithubIssue, GithubLabel};
