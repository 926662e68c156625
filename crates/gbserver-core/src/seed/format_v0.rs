//! Seed Format v0 schema
//!
//! Defines the YAML structure for seeding organizations, users and
//! repositories.

use serde::{Deserialize, Serialize};

/// Top-level seed file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedV0 {
    /// Schema version (must be 0 for this format)
    pub schema_version: u32,

    #[serde(default)]
    pub organizations: Vec<SeedOrganization>,

    #[serde(default)]
    pub repositories: Vec<SeedRepository>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedOrganization {
    pub name: String,
    pub id: u64,
    #[serde(default)]
    pub users: Vec<SeedUser>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedUser {
    pub login: String,
    pub id: u64,
    pub node_id: String,
    #[serde(rename = "type", default = "default_user_type")]
    pub user_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedRepository {
    pub org: String,
    pub owner: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Fixed node ID; generated when absent
    #[serde(default)]
    pub node_id: Option<String>,
    #[serde(default)]
    pub branches: Vec<SeedBranch>,
    #[serde(default)]
    pub pull_requests: Vec<SeedPullRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedBranch {
    pub name: String,
    /// Commit SHA; generated when empty
    #[serde(default)]
    pub sha: String,
    #[serde(default)]
    pub protected: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedPullRequest {
    pub title: String,
    #[serde(default)]
    pub body: String,
    pub head: String,
    pub base: String,
    /// Final state; pull requests are opened and then moved to it
    #[serde(default = "default_pull_request_state")]
    pub state: String,
}

fn default_user_type() -> String {
    "User".to_string()
}

fn default_pull_request_state() -> String {
    "open".to_string()
}
