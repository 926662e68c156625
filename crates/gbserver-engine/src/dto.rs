//! Request and response objects
//!
//! Responses replace foreign keys with resolved nested objects (owner info,
//! branch commit details, repository). They are built only by `GbService`
//! while it holds the store lock.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gbserver_core::{Branch, PullRequest, Repository, Result, Store, User, UserKey};

// ===== Requests =====

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRepoRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBranchRequest {
    /// `refs/heads/<name>`
    #[serde(rename = "ref")]
    pub reference: String,
    /// Commit SHA; generated when empty
    #[serde(default)]
    pub sha: String,
}

/// Body for both creating and updating a pull request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    /// `<owner>:<branch>`
    #[serde(default)]
    pub head: String,
    #[serde(default)]
    pub base: String,
    #[serde(default)]
    pub state: String,
}

// ===== Responses =====

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerInfo {
    pub login: String,
    pub id: u64,
    pub node_id: String,
    #[serde(rename = "type")]
    pub user_type: String,
}

impl From<&User> for OwnerInfo {
    fn from(user: &User) -> Self {
        Self {
            login: user.login.clone(),
            id: user.id,
            node_id: user.node_id.clone(),
            user_type: user.user_type.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoResponse {
    pub id: u64,
    pub name: String,
    pub node_id: String,
    pub description: String,
    pub owner: OwnerInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitResponse {
    pub sha: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchResponse {
    pub name: String,
    pub commit: CommitResponse,
    pub protected: bool,
}

impl From<&Branch> for BranchResponse {
    fn from(branch: &Branch) -> Self {
        Self {
            name: branch.name.clone(),
            commit: CommitResponse {
                sha: branch.commit.sha.clone(),
                url: branch.commit.url.clone(),
            },
            protected: branch.protected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefObject {
    #[serde(rename = "type")]
    pub object_type: String,
    pub sha: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBranchResponse {
    #[serde(rename = "ref")]
    pub reference: String,
    pub node_id: String,
    pub url: String,
    pub object: RefObject,
}

impl From<&Branch> for CreateBranchResponse {
    fn from(branch: &Branch) -> Self {
        Self {
            reference: format!("refs/heads/{}", branch.name),
            node_id: branch.node_id.clone(),
            url: branch.url.clone(),
            object: RefObject {
                object_type: "commit".to_string(),
                sha: branch.commit.sha.clone(),
                url: branch.commit.url.clone(),
            },
        }
    }
}

/// Head or base side of a pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestEndpoint {
    pub label: String,
    #[serde(rename = "ref")]
    pub reference: String,
    /// Current commit of the branch; empty once the branch is gone
    pub sha: String,
    pub user: Option<OwnerInfo>,
    pub repo: Option<RepoResponse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestResponse {
    pub url: String,
    pub id: String,
    pub number: u64,
    pub node_id: String,
    pub title: String,
    pub body: String,
    pub state: String,
    pub user: Option<OwnerInfo>,
    pub commits: u32,
    pub additions: u32,
    pub deletions: u32,
    pub changed_files: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub head: PullRequestEndpoint,
    pub base: PullRequestEndpoint,
}

// ===== Shaping =====

pub(crate) fn repo_response(store: &Store, repo: &Repository) -> Result<RepoResponse> {
    let owner = store.get_user(&UserKey::new(repo.org.clone(), repo.owner.clone()))?;
    Ok(RepoResponse {
        id: repo.id,
        name: repo.name.clone(),
        node_id: repo.node_id.clone(),
        description: repo.description.clone(),
        owner: OwnerInfo::from(owner),
    })
}

/// Re-derive display data from the current store contents
pub(crate) fn pull_request_response(store: &Store, pr: &PullRequest) -> PullRequestResponse {
    let repo_key = gbserver_core::RepoKey::new(pr.org.clone(), pr.owner.clone(), pr.repo.clone());
    let repo = store
        .get_repository(&repo_key)
        .ok()
        .and_then(|repo| repo_response(store, repo).ok());
    let sha_of = |branch: &str| {
        store
            .get_branch(&repo_key.branch(branch))
            .map(|b| b.commit.sha.clone())
            .unwrap_or_default()
    };
    let user_of = |login: &str| {
        store
            .get_user(&UserKey::new(pr.org.clone(), login))
            .ok()
            .map(OwnerInfo::from)
    };

    let author = user_of(&pr.head.owner);
    PullRequestResponse {
        url: pr.url.clone(),
        id: pr.id.clone(),
        number: pr.number,
        node_id: pr.node_id.clone(),
        title: pr.title.clone(),
        body: pr.body.clone(),
        state: pr.state.to_string(),
        user: author.clone(),
        commits: pr.stats.commits,
        additions: pr.stats.additions,
        deletions: pr.stats.deletions,
        changed_files: pr.stats.changed_files,
        created_at: pr.created_at,
        updated_at: pr.updated_at,
        closed_at: pr.closed_at,
        head: PullRequestEndpoint {
            label: pr.head.to_string(),
            reference: pr.head.branch.clone(),
            sha: sha_of(&pr.head.branch),
            user: author,
            repo: repo.clone(),
        },
        base: PullRequestEndpoint {
            label: pr.base.clone(),
            reference: pr.base.clone(),
            sha: sha_of(&pr.base),
            user: user_of(&pr.owner),
            repo,
        },
    }
}
