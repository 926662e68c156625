//! Structured entity keys
//!
//! Entities are addressed by the tuple of names that scopes them rather than
//! by a joined string, so names containing separators cannot collide.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Key of a user within an organization
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserKey {
    pub org: String,
    pub login: String,
}

impl UserKey {
    pub fn new(org: impl Into<String>, login: impl Into<String>) -> Self {
        Self {
            org: org.into(),
            login: login.into(),
        }
    }
}

impl fmt::Display for UserKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.org, self.login)
    }
}

/// Key of a repository: (organization, owner, repository name)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RepoKey {
    pub org: String,
    pub owner: String,
    pub repo: String,
}

impl RepoKey {
    pub fn new(org: impl Into<String>, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            org: org.into(),
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Key of the user owning this repository
    pub fn owner_key(&self) -> UserKey {
        UserKey::new(self.org.clone(), self.owner.clone())
    }

    /// Key of a branch inside this repository
    pub fn branch(&self, name: impl Into<String>) -> BranchKey {
        BranchKey {
            repo: self.clone(),
            branch: name.into(),
        }
    }
}

impl fmt::Display for RepoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.org, self.owner, self.repo)
    }
}

/// Key of a branch: repository key plus branch name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BranchKey {
    pub repo: RepoKey,
    pub branch: String,
}

impl BranchKey {
    pub fn new(
        org: impl Into<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
        branch: impl Into<String>,
    ) -> Self {
        RepoKey::new(org, owner, repo).branch(branch)
    }
}

impl fmt::Display for BranchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.repo, self.branch)
    }
}
