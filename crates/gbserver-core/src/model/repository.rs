use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::keys::RepoKey;

/// Repository - owned by one user inside one organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Taken from the organization's repository counter at creation
    pub id: u64,
    pub node_id: String,
    pub name: String,
    pub description: String,
    pub org: String,
    pub owner: String,

    /// Branch names in creation order
    pub branches: Vec<String>,

    /// Pull request IDs ever created here, in creation order
    pub pull_request_ids: Vec<String>,

    /// Monotonic; feeds pull request numbers and IDs
    pub pull_request_counter: u64,

    pub created_at: DateTime<Utc>,
}

impl Repository {
    pub fn new(
        id: u64,
        node_id: impl Into<String>,
        key: &RepoKey,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            node_id: node_id.into(),
            name: key.repo.clone(),
            description: description.into(),
            org: key.org.clone(),
            owner: key.owner.clone(),
            branches: Vec::new(),
            pull_request_ids: Vec::new(),
            pull_request_counter: 0,
            created_at: Utc::now(),
        }
    }

    pub fn key(&self) -> RepoKey {
        RepoKey::new(self.org.clone(), self.owner.clone(), self.name.clone())
    }

    pub fn has_branch(&self, name: &str) -> bool {
        self.branches.iter().any(|b| b == name)
    }

    pub fn add_branch(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.has_branch(&name) {
            self.branches.push(name);
        }
    }

    pub fn remove_branch(&mut self, name: &str) {
        self.branches.retain(|b| b != name);
    }

    pub fn has_pull_request(&self, id: &str) -> bool {
        self.pull_request_ids.iter().any(|p| p == id)
    }
}
