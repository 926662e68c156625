use chrono::Utc;

use super::store::Store;
use crate::errors::{GbError, Result};
use crate::ids::{self, OpaqueKind};
use crate::model::{HeadRef, PullRequest, PullRequestState, RepoKey, UserKey};
use crate::rules::validation::{require_branch, require_repository, require_same_organization};

/// Input for opening a pull request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPullRequest {
    pub title: String,
    pub body: String,
    /// `<owner>:<branch>`
    pub head: String,
    /// Target branch name
    pub base: String,
}

/// Input for moving an open pull request to a terminal state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequestUpdate {
    pub state: String,
    pub title: Option<String>,
    pub body: Option<String>,
}

/// List a repository's pull requests in creation order
///
/// # Errors
///
/// Returns the first failure of the organization, owner and repository checks.
pub fn list_pull_requests<'a>(store: &'a Store, key: &RepoKey) -> Result<Vec<&'a PullRequest>> {
    let repo = require_repository(store, key)?;
    repo.pull_request_ids
        .iter()
        .map(|id| store.get_pull_request(id))
        .collect()
}

/// Open a pull request from `head` into `base`
///
/// Checks run in order: repository chain, head syntax, head branch, base
/// branch, organization membership, existing open pull request on the head.
///
/// # Errors
///
/// * Repository chain failures and `BranchNotFound`
/// * `InvalidHeadRef` - head not of the form `<owner>:<branch>`
/// * `OwnersNotInSameOrganization` - head owner outside the repository's organization
/// * `PullRequestAlreadyExists` - head branch already carries an open pull request
/// * `IntegrityViolation` - the generated ID is already in use; nothing is overwritten
pub fn create_pull_request(
    store: &mut Store,
    key: &RepoKey,
    request: &NewPullRequest,
) -> Result<String> {
    let repo = require_repository(store, key)?;
    let head = HeadRef::parse(&request.head)?;
    let head_key = key.branch(head.branch.clone());
    let head_branch = require_branch(store, &head_key)?;
    require_branch(store, &key.branch(request.base.clone()))?;
    require_same_organization(store, &key.org, &key.owner, &head.owner)?;

    if let Some(existing) = &head_branch.pull_request_id {
        return Err(GbError::PullRequestAlreadyExists {
            head: head.to_string(),
            pull_request_id: existing.clone(),
        });
    }

    let sequence = repo.pull_request_counter + 1;
    let id = ids::pull_request_id(&key.org, &key.owner, &key.repo, sequence);
    if store.get_pull_request(&id).is_ok() {
        return Err(GbError::IntegrityViolation {
            reason: format!("pull request id {} is already taken", id),
        });
    }
    let author_id = store
        .get_user(&UserKey::new(key.org.clone(), head.owner.clone()))?
        .id;
    let now = Utc::now();
    let pr = PullRequest {
        id: id.clone(),
        number: sequence,
        node_id: ids::opaque_id(OpaqueKind::NodeId),
        url: ids::pull_request_url(store.base_url(), &key.owner, &key.repo, &id),
        org: key.org.clone(),
        owner: key.owner.clone(),
        repo: key.repo.clone(),
        head,
        base: request.base.clone(),
        author_id,
        state: PullRequestState::Open,
        title: request.title.clone(),
        body: request.body.clone(),
        stats: ids::synthetic_change_stats(),
        created_at: now,
        updated_at: now,
        closed_at: None,
    };

    let repo = store.get_repository_mut(key)?;
    repo.pull_request_counter = sequence;
    repo.pull_request_ids.push(id.clone());
    store.get_branch_mut(&head_key)?.pull_request_id = Some(id.clone());
    store.insert_pull_request(pr);

    tracing::debug!(repo = %key, pull_request_id = %id, "Opened pull request");
    Ok(id)
}

/// Move an open pull request to a terminal state
///
/// Clears the head branch's back-reference so a new pull request may be
/// opened from it. Title and body are replaced when given.
///
/// # Errors
///
/// * Repository chain failures
/// * `PullRequestNotFound` - ID unknown or not part of this repository
/// * `PullRequestAlreadyClosed` - pull request is no longer open
/// * `InvalidPullRequestState` - requested state is unknown or `open`
pub fn update_pull_request(
    store: &mut Store,
    key: &RepoKey,
    id: &str,
    update: &PullRequestUpdate,
) -> Result<()> {
    let repo = require_repository(store, key)?;
    if !repo.has_pull_request(id) {
        return Err(GbError::PullRequestNotFound {
            pull_request_id: id.to_string(),
        });
    }

    let pr = store.get_pull_request(id)?;
    if !pr.is_open() {
        return Err(GbError::PullRequestAlreadyClosed {
            pull_request_id: id.to_string(),
            state: pr.state.to_string(),
        });
    }

    let state: PullRequestState = update.state.parse()?;
    if !state.is_terminal() {
        return Err(GbError::InvalidPullRequestState {
            state: update.state.clone(),
        });
    }

    let head_key = key.branch(pr.head.branch.clone());
    if let Ok(branch) = store.get_branch_mut(&head_key) {
        if branch.pull_request_id.as_deref() == Some(id) {
            branch.pull_request_id = None;
        }
    }

    let now = Utc::now();
    let pr = store.get_pull_request_mut(id)?;
    pr.state = state;
    if let Some(title) = &update.title {
        pr.title = title.clone();
    }
    if let Some(body) = &update.body {
        pr.body = body.clone();
    }
    pr.updated_at = now;
    pr.closed_at = Some(now);

    tracing::debug!(repo = %key, pull_request_id = id, state = %state, "Updated pull request");
    Ok(())
}
