use std::collections::HashMap;

use crate::errors::{GbError, Result};
use crate::model::{Branch, BranchKey, Organization, PullRequest, RepoKey, Repository, User, UserKey};

/// Base URL used to build branch, commit and pull request URLs
pub const DEFAULT_BASE_URL: &str = "https://api.gbserver.com";

/// In-memory entity store
///
/// Five collections indexed by structured keys. The store exposes guarded
/// access only; cross-entity updates are performed by the ops modules.
/// Not thread-safe on its own, see `SharedStore`.
#[derive(Debug, Clone)]
pub struct Store {
    pub(crate) base_url: String,
    pub(crate) organizations: HashMap<String, Organization>,
    pub(crate) users: HashMap<UserKey, User>,
    pub(crate) repositories: HashMap<RepoKey, Repository>,
    pub(crate) branches: HashMap<BranchKey, Branch>,
    /// Global pull request collection keyed by hash ID
    pub(crate) pull_requests: HashMap<String, PullRequest>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// Create a new empty Store using the default base URL
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            organizations: HashMap::new(),
            users: HashMap::new(),
            repositories: HashMap::new(),
            branches: HashMap::new(),
            pull_requests: HashMap::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ===== Organizations =====

    /// Get an organization by name
    ///
    /// # Errors
    ///
    /// Returns `OrganizationNotFound` if no organization has this name.
    pub fn get_organization(&self, name: &str) -> Result<&Organization> {
        self.organizations
            .get(name)
            .ok_or_else(|| GbError::OrganizationNotFound {
                org: name.to_string(),
            })
    }

    /// # Errors
    ///
    /// Returns `OrganizationNotFound` if no organization has this name.
    pub fn get_organization_mut(&mut self, name: &str) -> Result<&mut Organization> {
        self.organizations
            .get_mut(name)
            .ok_or_else(|| GbError::OrganizationNotFound {
                org: name.to_string(),
            })
    }

    pub fn insert_organization(&mut self, org: Organization) {
        self.organizations.insert(org.name.clone(), org);
    }

    pub fn list_organizations(&self) -> Vec<&Organization> {
        self.organizations.values().collect()
    }

    // ===== Users =====

    /// Get a user by `(org, login)`
    ///
    /// # Errors
    ///
    /// Returns `OwnerNotFound` if the user is not registered under the organization.
    pub fn get_user(&self, key: &UserKey) -> Result<&User> {
        self.users.get(key).ok_or_else(|| GbError::OwnerNotFound {
            org: key.org.clone(),
            owner: key.login.clone(),
        })
    }

    /// # Errors
    ///
    /// Returns `OwnerNotFound` if the user is not registered under the organization.
    pub fn get_user_mut(&mut self, key: &UserKey) -> Result<&mut User> {
        self.users.get_mut(key).ok_or_else(|| GbError::OwnerNotFound {
            org: key.org.clone(),
            owner: key.login.clone(),
        })
    }

    pub fn insert_user(&mut self, key: UserKey, user: User) {
        self.users.insert(key, user);
    }

    // ===== Repositories =====

    /// Get a repository by `(org, owner, repo)`
    ///
    /// # Errors
    ///
    /// Returns `RepositoryNotFound` if the key is absent.
    pub fn get_repository(&self, key: &RepoKey) -> Result<&Repository> {
        self.repositories
            .get(key)
            .ok_or_else(|| GbError::RepositoryNotFound { key: key.clone() })
    }

    /// # Errors
    ///
    /// Returns `RepositoryNotFound` if the key is absent.
    pub fn get_repository_mut(&mut self, key: &RepoKey) -> Result<&mut Repository> {
        self.repositories
            .get_mut(key)
            .ok_or_else(|| GbError::RepositoryNotFound { key: key.clone() })
    }

    pub fn contains_repository(&self, key: &RepoKey) -> bool {
        self.repositories.contains_key(key)
    }

    pub fn insert_repository(&mut self, repo: Repository) {
        self.repositories.insert(repo.key(), repo);
    }

    pub fn remove_repository(&mut self, key: &RepoKey) -> Option<Repository> {
        self.repositories.remove(key)
    }

    // ===== Branches =====

    /// Get a branch by `(org, owner, repo, branch)`
    ///
    /// # Errors
    ///
    /// Returns `BranchNotFound` if the key is absent.
    pub fn get_branch(&self, key: &BranchKey) -> Result<&Branch> {
        self.branches
            .get(key)
            .ok_or_else(|| GbError::BranchNotFound { key: key.clone() })
    }

    /// # Errors
    ///
    /// Returns `BranchNotFound` if the key is absent.
    pub fn get_branch_mut(&mut self, key: &BranchKey) -> Result<&mut Branch> {
        self.branches
            .get_mut(key)
            .ok_or_else(|| GbError::BranchNotFound { key: key.clone() })
    }

    pub fn contains_branch(&self, key: &BranchKey) -> bool {
        self.branches.contains_key(key)
    }

    pub fn insert_branch(&mut self, key: BranchKey, branch: Branch) {
        self.branches.insert(key, branch);
    }

    pub fn remove_branch(&mut self, key: &BranchKey) -> Option<Branch> {
        self.branches.remove(key)
    }

    // ===== Pull requests =====

    /// Get a pull request by its hash ID
    ///
    /// # Errors
    ///
    /// Returns `PullRequestNotFound` if the ID is absent.
    pub fn get_pull_request(&self, id: &str) -> Result<&PullRequest> {
        self.pull_requests
            .get(id)
            .ok_or_else(|| GbError::PullRequestNotFound {
                pull_request_id: id.to_string(),
            })
    }

    /// # Errors
    ///
    /// Returns `PullRequestNotFound` if the ID is absent.
    pub fn get_pull_request_mut(&mut self, id: &str) -> Result<&mut PullRequest> {
        self.pull_requests
            .get_mut(id)
            .ok_or_else(|| GbError::PullRequestNotFound {
                pull_request_id: id.to_string(),
            })
    }

    pub fn insert_pull_request(&mut self, pr: PullRequest) {
        self.pull_requests.insert(pr.id.clone(), pr);
    }

    pub fn remove_pull_request(&mut self, id: &str) -> Option<PullRequest> {
        self.pull_requests.remove(id)
    }

    // ===== Counts =====

    pub fn repository_count(&self) -> usize {
        self.repositories.len()
    }

    pub fn branch_count(&self) -> usize {
        self.branches.len()
    }

    pub fn pull_request_count(&self) -> usize {
        self.pull_requests.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_return_typed_errors() {
        let store = Store::new();
        assert!(matches!(
            store.get_organization("gborg"),
            Err(GbError::OrganizationNotFound { .. })
        ));
        assert!(matches!(
            store.get_user(&UserKey::new("gborg", "gbuser")),
            Err(GbError::OwnerNotFound { .. })
        ));
        assert!(matches!(
            store.get_repository(&RepoKey::new("gborg", "gbuser", "gbrepo")),
            Err(GbError::RepositoryNotFound { .. })
        ));
        assert!(matches!(
            store.get_branch(&BranchKey::new("gborg", "gbuser", "gbrepo", "master")),
            Err(GbError::BranchNotFound { .. })
        ));
        assert!(matches!(
            store.get_pull_request("123"),
            Err(GbError::PullRequestNotFound { .. })
        ));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let store = Store::with_base_url("http://localhost:9090/");
        assert_eq!(store.base_url(), "http://localhost:9090");
        assert_eq!(Store::new().base_url(), DEFAULT_BASE_URL);
    }
}
