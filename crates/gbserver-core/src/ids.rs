//! Identifier generation
//!
//! Numeric IDs come from per-entity counters, opaque node IDs and commit SHAs
//! are random strings over a fixed alphabet, and pull request IDs are a
//! stable hash of their owning repository and sequence number.

use rand::Rng;
use sha2::{Digest, Sha256};

use crate::model::{ChangeStats, Organization, Repository};

const NODE_ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789=";
const COMMIT_SHA_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Kind of opaque identifier to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpaqueKind {
    /// 23 characters, mixed-case alphanumerics plus '='
    NodeId,
    /// 40 characters, lowercase alphanumerics
    CommitSha,
}

impl OpaqueKind {
    pub fn length(&self) -> usize {
        match self {
            OpaqueKind::NodeId => 23,
            OpaqueKind::CommitSha => 40,
        }
    }

    fn alphabet(&self) -> &'static [u8] {
        match self {
            OpaqueKind::NodeId => NODE_ID_ALPHABET,
            OpaqueKind::CommitSha => COMMIT_SHA_ALPHABET,
        }
    }
}

/// Generate a random opaque identifier. Collisions are accepted.
pub fn opaque_id(kind: OpaqueKind) -> String {
    let alphabet = kind.alphabet();
    let mut rng = rand::thread_rng();
    (0..kind.length())
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())] as char)
        .collect()
}

/// Next repository ID for an organization
///
/// The caller must store the incremented counter in the same critical
/// section that inserts the repository.
pub fn next_repository_id(org: &Organization) -> u64 {
    org.repository_counter + 1
}

/// Next branch ID within a repository
pub fn next_branch_id(repo: &Repository) -> u64 {
    repo.branches.len() as u64 + 1
}

/// Stable pull request ID
///
/// First eight bytes of SHA-256 over the length-prefixed org, owner and
/// repository names followed by the sequence, read big-endian and rendered
/// in decimal.
pub fn pull_request_id(org: &str, owner: &str, repo: &str, sequence: u64) -> String {
    let mut hasher = Sha256::new();
    for part in [org, owner, repo] {
        hasher.update((part.len() as u64).to_be_bytes());
        hasher.update(part.as_bytes());
    }
    hasher.update(sequence.to_be_bytes());
    let digest = hasher.finalize();
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(prefix).to_string()
}

/// Random diff statistics for a new pull request
pub fn synthetic_change_stats() -> ChangeStats {
    let mut rng = rand::thread_rng();
    ChangeStats {
        commits: rng.gen_range(1..=20),
        additions: rng.gen_range(1..=500),
        deletions: rng.gen_range(0..=200),
        changed_files: rng.gen_range(1..=25),
    }
}

// URL builders

pub fn branch_url(base_url: &str, owner: &str, repo: &str, branch: &str) -> String {
    format!("{}/repos/{}/{}/git/refs/heads/{}", base_url, owner, repo, branch)
}

pub fn commit_url(base_url: &str, owner: &str, repo: &str, sha: &str) -> String {
    format!("{}/repos/{}/{}/git/commits/{}", base_url, owner, repo, sha)
}

pub fn pull_request_url(base_url: &str, owner: &str, repo: &str, id: &str) -> String {
    format!("{}/repos/{}/{}/pulls/{}", base_url, owner, repo, id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque_id_lengths_and_alphabets() {
        let node = opaque_id(OpaqueKind::NodeId);
        assert_eq!(node.len(), 23);
        assert!(node.bytes().all(|b| NODE_ID_ALPHABET.contains(&b)));

        let sha = opaque_id(OpaqueKind::CommitSha);
        assert_eq!(sha.len(), 40);
        assert!(sha
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()));
    }

    #[test]
    fn test_pull_request_id_is_deterministic() {
        let a = pull_request_id("gborg", "gbuser", "gbrepo", 1);
        let b = pull_request_id("gborg", "gbuser", "gbrepo", 1);
        assert_eq!(a, b);
        assert!(a.parse::<u64>().is_ok());
    }

    #[test]
    fn test_pull_request_id_varies_with_inputs() {
        let first = pull_request_id("gborg", "gbuser", "gbrepo", 1);
        assert_ne!(first, pull_request_id("gborg", "gbuser", "gbrepo", 2));
        assert_ne!(first, pull_request_id("gborg", "gbuser", "other", 1));
    }

    #[test]
    fn test_pull_request_id_components_do_not_run_together() {
        assert_ne!(
            pull_request_id("a/b", "c", "r", 1),
            pull_request_id("a", "b/c", "r", 1)
        );
        assert_ne!(
            pull_request_id("ab", "c", "r", 1),
            pull_request_id("a", "bc", "r", 1)
        );
    }

    #[test]
    fn test_next_repository_id_follows_counter() {
        let mut org = Organization::new(1, "gborg");
        assert_eq!(next_repository_id(&org), 1);
        org.repository_counter = 7;
        assert_eq!(next_repository_id(&org), 8);
    }

    #[test]
    fn test_urls() {
        let base = "https://api.gbserver.com";
        assert_eq!(
            branch_url(base, "gbuser", "gbrepo", "master"),
            "https://api.gbserver.com/repos/gbuser/gbrepo/git/refs/heads/master"
        );
        assert_eq!(
            pull_request_url(base, "gbuser", "gbrepo", "42"),
            "https://api.gbserver.com/repos/gbuser/gbrepo/pulls/42"
        );
    }
}
