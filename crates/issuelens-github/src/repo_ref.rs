use crate::GithubError;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Validated "owner/name" repository identifier.
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    /// Parses an "owner/name" identifier. Exactly one separator with
    /// non-empty parts on both sides; anything else is an invalid-input
    /// error. Runs before any network call is made.
    pub fn parse(repo: &str) -> Result<Self, GithubError> {
        let mut parts = repo.split('/');
        let owner = parts.next().unwrap_or_default();
        let name = parts.next().unwrap_or_default();
        if owner.is_empty() || name.is_empty() || parts.next().is_some() {
            return Err(GithubError::InvalidRepo {
                repo: repo.to_string(),
            });
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    pub fn as_repo_string(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}
