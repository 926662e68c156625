use serde::{Deserialize, Serialize};

/// Commit a branch points at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitDetails {
    pub sha: String,
    pub url: String,
}

/// Branch - a named ref inside a repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub id: u64,
    pub name: String,
    pub node_id: String,
    /// Ref URL (`.../git/refs/heads/<name>`)
    pub url: String,
    pub protected: bool,
    pub commit: CommitDetails,

    /// Pull request whose head is this branch, while that PR is open
    pub pull_request_id: Option<String>,
}

impl Branch {
    pub fn has_open_pull_request(&self) -> bool {
        self.pull_request_id.is_some()
    }
}
