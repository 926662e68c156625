use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::GbError;

/// Pull request lifecycle state
///
/// `Open` is the only non-terminal state. `Merged` is representable but no
/// operation produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PullRequestState {
    Open,
    Closed,
    Approved,
    Merged,
}

impl PullRequestState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PullRequestState::Open => "open",
            PullRequestState::Closed => "closed",
            PullRequestState::Approved => "approved",
            PullRequestState::Merged => "merged",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, PullRequestState::Open)
    }
}

impl fmt::Display for PullRequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PullRequestState {
    type Err = GbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(PullRequestState::Open),
            "closed" => Ok(PullRequestState::Closed),
            "approved" => Ok(PullRequestState::Approved),
            "merged" => Ok(PullRequestState::Merged),
            other => Err(GbError::InvalidPullRequestState {
                state: other.to_string(),
            }),
        }
    }
}

/// Head reference of a pull request, written `<owner>:<branch>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HeadRef {
    pub owner: String,
    pub branch: String,
}

impl HeadRef {
    pub fn new(owner: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            branch: branch.into(),
        }
    }

    /// Parse `<owner>:<branch>`; both halves must be non-empty
    ///
    /// # Errors
    ///
    /// Returns `InvalidHeadRef` when the colon is missing or either side is empty.
    pub fn parse(head: &str) -> Result<Self, GbError> {
        match head.split_once(':') {
            Some((owner, branch)) if !owner.is_empty() && !branch.is_empty() => {
                Ok(Self::new(owner, branch))
            }
            _ => Err(GbError::InvalidHeadRef {
                head: head.to_string(),
            }),
        }
    }
}

impl fmt::Display for HeadRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.owner, self.branch)
    }
}

/// Synthetic diff statistics reported with a pull request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeStats {
    pub commits: u32,
    pub additions: u32,
    pub deletions: u32,
    pub changed_files: u32,
}

/// Pull request from a head branch into a base branch of the same repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// Content-hash ID, stable for (org, owner, repo, sequence)
    pub id: String,
    /// Per-repository display number
    pub number: u64,
    pub node_id: String,
    pub url: String,

    pub org: String,
    pub owner: String,
    pub repo: String,

    pub head: HeadRef,
    pub base: String,

    /// User ID of the head owner
    pub author_id: u64,

    pub state: PullRequestState,
    pub title: String,
    pub body: String,
    pub stats: ChangeStats,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

impl PullRequest {
    pub fn is_open(&self) -> bool {
        self.state == PullRequestState::Open
    }
}
