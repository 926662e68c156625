use super::store::Store;
use crate::errors::{GbError, Result};
use crate::ids::{self, OpaqueKind};
use crate::model::{RepoKey, Repository, UserKey};
use crate::rules::validation::{require_owner, require_repository, validate_repository_name};

/// List an owner's repositories in creation order
///
/// # Errors
///
/// Returns `OrganizationNotFound` or `OwnerNotFound`.
pub fn list_repositories<'a>(store: &'a Store, owner: &UserKey) -> Result<Vec<&'a Repository>> {
    let user = require_owner(store, owner)?;
    user.repositories
        .iter()
        .map(|name| {
            store.get_repository(&RepoKey::new(
                owner.org.clone(),
                owner.login.clone(),
                name.clone(),
            ))
        })
        .collect()
}

/// Create a repository under `(org, owner)`
///
/// The ID is taken from the organization's counter, which is advanced in
/// the same call.
///
/// # Errors
///
/// * `OrganizationNotFound` / `OwnerNotFound` - validation chain
/// * `InvalidRepositoryName` - empty name or name containing `/`
/// * `RepositoryAlreadyExists` - owner already holds a repository of this name
pub fn create_repository(
    store: &mut Store,
    key: &RepoKey,
    description: &str,
) -> Result<u64> {
    let owner = require_owner(store, &key.owner_key())?;
    validate_repository_name(&key.repo)?;
    if owner.owns(&key.repo) || store.contains_repository(key) {
        return Err(GbError::RepositoryAlreadyExists { key: key.clone() });
    }

    let id = ids::next_repository_id(store.get_organization(&key.org)?);
    let repo = Repository::new(id, ids::opaque_id(OpaqueKind::NodeId), key, description);

    let org = store.get_organization_mut(&key.org)?;
    org.repository_counter = id;
    org.add_repository(key.repo.clone());
    store.get_user_mut(&key.owner_key())?.add_repository(key.repo.clone());
    store.insert_repository(repo);

    tracing::debug!(repo = %key, id, "Created repository");
    Ok(id)
}

/// Delete a repository together with its branches and pull requests
///
/// # Errors
///
/// Returns the first failure of the organization, owner and repository checks.
pub fn delete_repository(store: &mut Store, key: &RepoKey) -> Result<Repository> {
    require_repository(store, key)?;

    let repo = store
        .remove_repository(key)
        .ok_or_else(|| GbError::RepositoryNotFound { key: key.clone() })?;

    for name in &repo.branches {
        store.remove_branch(&key.branch(name.clone()));
    }
    for id in &repo.pull_request_ids {
        store.remove_pull_request(id);
    }

    store.get_organization_mut(&key.org)?.remove_repository(&key.repo);
    store.get_user_mut(&key.owner_key())?.remove_repository(&key.repo);

    tracing::debug!(
        repo = %key,
        branches = repo.branches.len(),
        pull_requests = repo.pull_request_ids.len(),
        "Deleted repository"
    );
    Ok(repo)
}
