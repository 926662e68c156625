use super::store::Store;
use crate::errors::{GbError, Result};
use crate::ids::{self, OpaqueKind};
use crate::model::{Branch, BranchKey, CommitDetails, PullRequest, RepoKey};
use crate::rules::validation::{parse_branch_ref, require_branch, require_repository};

/// List a repository's branches in creation order
///
/// # Errors
///
/// Returns the repository chain failure, or `NoBranches` when the
/// repository exists but has no branches.
pub fn list_branches<'a>(store: &'a Store, key: &RepoKey) -> Result<Vec<&'a Branch>> {
    let repo = require_repository(store, key)?;
    if repo.branches.is_empty() {
        return Err(GbError::NoBranches { key: key.clone() });
    }
    repo.branches
        .iter()
        .map(|name| store.get_branch(&key.branch(name.clone())))
        .collect()
}

/// Create a branch from a `refs/heads/<name>` reference
///
/// An empty `sha` gets a generated commit SHA.
///
/// # Errors
///
/// * Repository chain failures
/// * `InvalidBranchRef` - reference not of the form `refs/heads/<name>`
/// * `BranchAlreadyExists` - name already used in this repository
pub fn create_branch(
    store: &mut Store,
    key: &RepoKey,
    reference: &str,
    sha: &str,
) -> Result<BranchKey> {
    let repo = require_repository(store, key)?;
    let name = parse_branch_ref(reference)?;
    let branch_key = key.branch(name);
    if repo.has_branch(name) || store.contains_branch(&branch_key) {
        return Err(GbError::BranchAlreadyExists { key: branch_key });
    }

    let sha = if sha.is_empty() {
        ids::opaque_id(OpaqueKind::CommitSha)
    } else {
        sha.to_string()
    };
    let branch = Branch {
        id: ids::next_branch_id(repo),
        name: name.to_string(),
        node_id: ids::opaque_id(OpaqueKind::NodeId),
        url: ids::branch_url(store.base_url(), &key.owner, &key.repo, name),
        protected: false,
        commit: CommitDetails {
            url: ids::commit_url(store.base_url(), &key.owner, &key.repo, &sha),
            sha,
        },
        pull_request_id: None,
    };

    store.get_repository_mut(key)?.add_branch(branch.name.clone());
    store.insert_branch(branch_key.clone(), branch);

    tracing::debug!(branch = %branch_key, "Created branch");
    Ok(branch_key)
}

/// Delete a branch
///
/// An open pull request using the branch as head is removed along with it
/// and returned.
///
/// # Errors
///
/// Returns the first failure of the validation chain down to `BranchNotFound`.
pub fn delete_branch(store: &mut Store, key: &BranchKey) -> Result<Option<PullRequest>> {
    let cascaded_id = require_branch(store, key)?.pull_request_id.clone();

    let cascaded = match cascaded_id {
        Some(id) => {
            store
                .get_repository_mut(&key.repo)?
                .pull_request_ids
                .retain(|p| *p != id);
            store.remove_pull_request(&id)
        }
        None => None,
    };

    store.remove_branch(key);
    store.get_repository_mut(&key.repo)?.remove_branch(&key.branch);

    tracing::debug!(
        branch = %key,
        cascaded = cascaded.as_ref().map(|pr| pr.id.as_str()),
        "Deleted branch"
    );
    Ok(cascaded)
}
