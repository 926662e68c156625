use serde::{Deserialize, Serialize};

/// User - an owner account inside one organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub login: String,
    pub node_id: String,
    /// Account type as reported to clients (e.g. "User")
    pub user_type: String,
    /// Names of repositories this user owns
    pub repositories: Vec<String>,
}

impl User {
    pub fn new(id: u64, login: impl Into<String>, node_id: impl Into<String>) -> Self {
        Self {
            id,
            login: login.into(),
            node_id: node_id.into(),
            user_type: "User".to_string(),
            repositories: Vec::new(),
        }
    }

    pub fn owns(&self, repo: &str) -> bool {
        self.repositories.iter().any(|r| r == repo)
    }

    pub fn add_repository(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.owns(&name) {
            self.repositories.push(name);
        }
    }

    pub fn remove_repository(&mut self, name: &str) {
        self.repositories.retain(|r| r != name);
    }
}
