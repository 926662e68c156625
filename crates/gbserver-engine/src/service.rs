//! Domain service with boundary logging.
//!
//! ## Logging Ownership
//!
//! Each public operation logs exactly once at each boundary:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! ## Locking
//!
//! Read-only operations run under the store's read lock. Mutating operations
//! take the write lock once and hold it across validation, mutation and
//! response shaping.

use gbserver_core::ops::{
    branch_ops, pull_ops, repo_ops, NewPullRequest, PullRequestUpdate, SharedStore, Store,
};
use gbserver_core::{log_op_end, log_op_error, log_op_start};
use gbserver_core::{BranchKey, RepoKey, Result, UserKey};

use crate::dto::{
    self, BranchResponse, CreateBranchRequest, CreateBranchResponse, CreateRepoRequest,
    PullRequestRequest, PullRequestResponse, RepoResponse,
};

fn elapsed_ms(start: std::time::Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

/// Code-hosting management operations over a shared store
#[derive(Debug, Clone, Default)]
pub struct GbService {
    store: SharedStore,
}

impl GbService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    pub fn from_store(store: Store) -> Self {
        Self::new(SharedStore::new(store))
    }

    /// The underlying shared store
    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    // ===== Repositories =====

    /// List the repositories of `owner` in `org`
    ///
    /// # Errors
    ///
    /// `OrganizationNotFound` or `OwnerNotFound`.
    pub fn list_repositories(&self, org: &str, owner: &str) -> Result<Vec<RepoResponse>> {
        log_op_start!("list_repositories", org = org, owner = owner);
        let start = std::time::Instant::now();

        let result = self
            .store
            .read(|store| list_repositories_impl(store, &UserKey::new(org, owner)))
            .map_err(|e| {
                log_op_error!("list_repositories", e.clone(), duration_ms = elapsed_ms(start));
                e
            })?;

        log_op_end!(
            "list_repositories",
            duration_ms = elapsed_ms(start),
            result_len = result.len()
        );
        Ok(result)
    }

    /// Create a repository owned by `owner`
    ///
    /// # Errors
    ///
    /// Validation chain failures, `InvalidRepositoryName` or `RepositoryAlreadyExists`.
    pub fn create_repository(
        &self,
        org: &str,
        owner: &str,
        request: &CreateRepoRequest,
    ) -> Result<RepoResponse> {
        log_op_start!("create_repository", org = org, owner = owner, repo = request.name.as_str());
        let start = std::time::Instant::now();

        let key = RepoKey::new(org, owner, request.name.clone());
        let result = self
            .store
            .write(|store| create_repository_impl(store, &key, &request.description))
            .map_err(|e| {
                log_op_error!("create_repository", e.clone(), duration_ms = elapsed_ms(start));
                e
            })?;

        log_op_end!(
            "create_repository",
            duration_ms = elapsed_ms(start),
            repository_id = result.id
        );
        Ok(result)
    }

    /// Delete a repository with its branches and pull requests
    ///
    /// # Errors
    ///
    /// Validation chain failures down to `RepositoryNotFound`.
    pub fn delete_repository(&self, org: &str, owner: &str, repo: &str) -> Result<()> {
        log_op_start!("delete_repository", org = org, owner = owner, repo = repo);
        let start = std::time::Instant::now();

        let key = RepoKey::new(org, owner, repo);
        self.store
            .write(|store| repo_ops::delete_repository(store, &key).map(|_| ()))
            .map_err(|e| {
                log_op_error!("delete_repository", e.clone(), duration_ms = elapsed_ms(start));
                e
            })?;

        log_op_end!("delete_repository", duration_ms = elapsed_ms(start));
        Ok(())
    }

    // ===== Branches =====

    /// List the branches of a repository
    ///
    /// # Errors
    ///
    /// Validation chain failures, or `NoBranches` for a repository without branches.
    pub fn list_branches(&self, org: &str, owner: &str, repo: &str) -> Result<Vec<BranchResponse>> {
        log_op_start!("list_branches", org = org, owner = owner, repo = repo);
        let start = std::time::Instant::now();

        let key = RepoKey::new(org, owner, repo);
        let result = self
            .store
            .read(|store| {
                branch_ops::list_branches(store, &key)
                    .map(|branches| branches.into_iter().map(BranchResponse::from).collect::<Vec<_>>())
            })
            .map_err(|e| {
                log_op_error!("list_branches", e.clone(), duration_ms = elapsed_ms(start));
                e
            })?;

        log_op_end!(
            "list_branches",
            duration_ms = elapsed_ms(start),
            result_len = result.len()
        );
        Ok(result)
    }

    /// Create a branch from `refs/heads/<name>`
    ///
    /// # Errors
    ///
    /// Validation chain failures, `InvalidBranchRef` or `BranchAlreadyExists`.
    pub fn create_branch(
        &self,
        org: &str,
        owner: &str,
        repo: &str,
        request: &CreateBranchRequest,
    ) -> Result<CreateBranchResponse> {
        log_op_start!(
            "create_branch",
            org = org,
            owner = owner,
            repo = repo,
            target = request.reference.as_str()
        );
        let start = std::time::Instant::now();

        let key = RepoKey::new(org, owner, repo);
        let result = self
            .store
            .write(|store| create_branch_impl(store, &key, request))
            .map_err(|e| {
                log_op_error!("create_branch", e.clone(), duration_ms = elapsed_ms(start));
                e
            })?;

        log_op_end!("create_branch", duration_ms = elapsed_ms(start));
        Ok(result)
    }

    /// Delete a branch; an open pull request on it is deleted too
    ///
    /// # Errors
    ///
    /// Validation chain failures down to `BranchNotFound`.
    pub fn delete_branch(&self, org: &str, owner: &str, repo: &str, branch: &str) -> Result<()> {
        log_op_start!("delete_branch", org = org, owner = owner, repo = repo, branch = branch);
        let start = std::time::Instant::now();

        let key = BranchKey::new(org, owner, repo, branch);
        let cascaded = self
            .store
            .write(|store| branch_ops::delete_branch(store, &key))
            .map_err(|e| {
                log_op_error!("delete_branch", e.clone(), duration_ms = elapsed_ms(start));
                e
            })?;

        log_op_end!(
            "delete_branch",
            duration_ms = elapsed_ms(start),
            cascaded_pull_request = cascaded.as_ref().map(|pr| pr.id.as_str())
        );
        Ok(())
    }

    // ===== Pull requests =====

    /// List the pull requests of a repository, whatever their state
    ///
    /// # Errors
    ///
    /// Validation chain failures down to `RepositoryNotFound`.
    pub fn list_pull_requests(
        &self,
        org: &str,
        owner: &str,
        repo: &str,
    ) -> Result<Vec<PullRequestResponse>> {
        log_op_start!("list_pull_requests", org = org, owner = owner, repo = repo);
        let start = std::time::Instant::now();

        let key = RepoKey::new(org, owner, repo);
        let result = self
            .store
            .read(|store| list_pull_requests_impl(store, &key))
            .map_err(|e| {
                log_op_error!("list_pull_requests", e.clone(), duration_ms = elapsed_ms(start));
                e
            })?;

        log_op_end!(
            "list_pull_requests",
            duration_ms = elapsed_ms(start),
            result_len = result.len()
        );
        Ok(result)
    }

    /// Open a pull request
    ///
    /// # Errors
    ///
    /// Validation chain failures, `InvalidHeadRef`, `BranchNotFound`,
    /// `OwnersNotInSameOrganization` or `PullRequestAlreadyExists`.
    pub fn create_pull_request(
        &self,
        org: &str,
        owner: &str,
        repo: &str,
        request: &PullRequestRequest,
    ) -> Result<PullRequestResponse> {
        log_op_start!(
            "create_pull_request",
            org = org,
            owner = owner,
            repo = repo,
            target = request.head.as_str()
        );
        let start = std::time::Instant::now();

        let key = RepoKey::new(org, owner, repo);
        let result = self
            .store
            .write(|store| create_pull_request_impl(store, &key, request))
            .map_err(|e| {
                log_op_error!("create_pull_request", e.clone(), duration_ms = elapsed_ms(start));
                e
            })?;

        log_op_end!(
            "create_pull_request",
            duration_ms = elapsed_ms(start),
            pull_request_id = result.id.as_str()
        );
        Ok(result)
    }

    /// Move an open pull request to `closed`, `approved` or `merged`
    ///
    /// # Errors
    ///
    /// Validation chain failures, `PullRequestNotFound`,
    /// `PullRequestAlreadyClosed` or `InvalidPullRequestState`.
    pub fn update_pull_request(
        &self,
        org: &str,
        owner: &str,
        repo: &str,
        pull_request_id: &str,
        request: &PullRequestRequest,
    ) -> Result<PullRequestResponse> {
        log_op_start!(
            "update_pull_request",
            org = org,
            owner = owner,
            repo = repo,
            pull_request_id = pull_request_id
        );
        let start = std::time::Instant::now();

        let key = RepoKey::new(org, owner, repo);
        let result = self
            .store
            .write(|store| update_pull_request_impl(store, &key, pull_request_id, request))
            .map_err(|e| {
                log_op_error!("update_pull_request", e.clone(), duration_ms = elapsed_ms(start));
                e
            })?;

        log_op_end!(
            "update_pull_request",
            duration_ms = elapsed_ms(start),
            state = result.state.as_str()
        );
        Ok(result)
    }
}

fn list_repositories_impl(store: &Store, owner: &UserKey) -> Result<Vec<RepoResponse>> {
    let repos = repo_ops::list_repositories(store, owner)?;
    repos
        .into_iter()
        .map(|repo| dto::repo_response(store, repo))
        .collect()
}

fn create_repository_impl(store: &mut Store, key: &RepoKey, description: &str) -> Result<RepoResponse> {
    repo_ops::create_repository(store, key, description)?;
    let repo = store.get_repository(key)?;
    dto::repo_response(store, repo)
}

fn create_branch_impl(
    store: &mut Store,
    key: &RepoKey,
    request: &CreateBranchRequest,
) -> Result<CreateBranchResponse> {
    let branch_key = branch_ops::create_branch(store, key, &request.reference, &request.sha)?;
    Ok(CreateBranchResponse::from(store.get_branch(&branch_key)?))
}

fn list_pull_requests_impl(store: &Store, key: &RepoKey) -> Result<Vec<PullRequestResponse>> {
    let prs = pull_ops::list_pull_requests(store, key)?;
    Ok(prs
        .into_iter()
        .map(|pr| dto::pull_request_response(store, pr))
        .collect())
}

fn create_pull_request_impl(
    store: &mut Store,
    key: &RepoKey,
    request: &PullRequestRequest,
) -> Result<PullRequestResponse> {
    let new = NewPullRequest {
        title: request.title.clone().unwrap_or_default(),
        body: request.body.clone().unwrap_or_default(),
        head: request.head.clone(),
        base: request.base.clone(),
    };
    let id = pull_ops::create_pull_request(store, key, &new)?;
    let pr = store.get_pull_request(&id)?;
    Ok(dto::pull_request_response(store, pr))
}

fn update_pull_request_impl(
    store: &mut Store,
    key: &RepoKey,
    id: &str,
    request: &PullRequestRequest,
) -> Result<PullRequestResponse> {
    let update = PullRequestUpdate {
        state: request.state.clone(),
        title: request.title.clone(),
        body: request.body.clone(),
    };
    pull_ops::update_pull_request(store, key, id, &update)?;
    let pr = store.get_pull_request(id)?;
    Ok(dto::pull_request_response(store, pr))
}
