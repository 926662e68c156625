//! Validation chain
//!
//! Read-only existence checks, called in a fixed order: organization, owner,
//! repository, branch. Each check runs the one before it, so the first
//! missing link in the chain is the error reported.

use crate::errors::{GbError, Result};
use crate::model::{Branch, BranchKey, Organization, RepoKey, Repository, User, UserKey};
use crate::ops::Store;

const BRANCH_REF_PREFIX: &str = "refs/heads/";

/// # Errors
///
/// Returns `OrganizationNotFound` if the organization does not exist.
pub fn require_organization<'a>(store: &'a Store, org: &str) -> Result<&'a Organization> {
    store.get_organization(org)
}

/// # Errors
///
/// Returns `OrganizationNotFound` or `OwnerNotFound`.
pub fn require_owner<'a>(store: &'a Store, key: &UserKey) -> Result<&'a User> {
    let org = require_organization(store, &key.org)?;
    if !org.is_member(&key.login) {
        return Err(GbError::OwnerNotFound {
            org: key.org.clone(),
            owner: key.login.clone(),
        });
    }
    store.get_user(key)
}

/// # Errors
///
/// Returns the first failure of the organization, owner and repository checks.
pub fn require_repository<'a>(store: &'a Store, key: &RepoKey) -> Result<&'a Repository> {
    let owner = require_owner(store, &key.owner_key())?;
    if !owner.owns(&key.repo) {
        return Err(GbError::RepositoryNotFound { key: key.clone() });
    }
    store.get_repository(key)
}

/// # Errors
///
/// Returns the first failure of the repository chain, then `BranchNotFound`.
pub fn require_branch<'a>(store: &'a Store, key: &BranchKey) -> Result<&'a Branch> {
    let repo = require_repository(store, &key.repo)?;
    if !repo.has_branch(&key.branch) {
        return Err(GbError::BranchNotFound { key: key.clone() });
    }
    store.get_branch(key)
}

/// Check that the repository owner and the head owner both belong to `org`
///
/// # Errors
///
/// Returns `OrganizationNotFound` or `OwnersNotInSameOrganization`.
pub fn require_same_organization(
    store: &Store,
    org: &str,
    owner: &str,
    head_owner: &str,
) -> Result<()> {
    let organization = require_organization(store, org)?;
    let registered = |login: &str| {
        organization.is_member(login) && store.get_user(&UserKey::new(org, login)).is_ok()
    };
    if registered(owner) && registered(head_owner) {
        Ok(())
    } else {
        Err(GbError::OwnersNotInSameOrganization {
            org: org.to_string(),
            owner: owner.to_string(),
            head_owner: head_owner.to_string(),
        })
    }
}

/// Extract the branch name from `refs/heads/<name>`
///
/// The name must be non-empty and contain no further `/`.
///
/// # Errors
///
/// Returns `InvalidBranchRef` for any other shape.
pub fn parse_branch_ref(reference: &str) -> Result<&str> {
    match reference.strip_prefix(BRANCH_REF_PREFIX) {
        Some(name) if !name.is_empty() && !name.contains('/') => Ok(name),
        _ => Err(GbError::InvalidBranchRef {
            reference: reference.to_string(),
        }),
    }
}

/// Why `name` cannot be an organization, login or repository name, if it cannot
pub fn name_defect(name: &str) -> Option<&'static str> {
    if name.trim().is_empty() {
        Some("name cannot be empty")
    } else if name.contains('/') {
        Some("name cannot contain '/'")
    } else {
        None
    }
}

/// Repository names must be non-empty and free of `/`
///
/// # Errors
///
/// Returns `InvalidRepositoryName` describing the problem.
pub fn validate_repository_name(name: &str) -> Result<()> {
    match name_defect(name) {
        None => Ok(()),
        Some(reason) => Err(GbError::InvalidRepositoryName {
            name: name.to_string(),
            reason: reason.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_branch_ref() {
        assert_eq!(parse_branch_ref("refs/heads/featureX").unwrap(), "featureX");
        for bad in ["featureX", "refs/heads/", "refs/heads/a/b", "refs/tags/v1", ""] {
            assert!(
                matches!(parse_branch_ref(bad), Err(GbError::InvalidBranchRef { .. })),
                "expected rejection of {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_validate_repository_name() {
        assert!(validate_repository_name("testrepo").is_ok());
        assert!(matches!(
            validate_repository_name(""),
            Err(GbError::InvalidRepositoryName { .. })
        ));
        assert!(matches!(
            validate_repository_name("   "),
            Err(GbError::InvalidRepositoryName { .. })
        ));
        assert!(matches!(
            validate_repository_name("a/b"),
            Err(GbError::InvalidRepositoryName { .. })
        ));
    }

    #[test]
    fn test_chain_reports_first_missing_link() {
        let store = Store::new();
        let key = BranchKey::new("nope", "nobody", "norepo", "nobranch");
        assert!(matches!(
            require_branch(&store, &key),
            Err(GbError::OrganizationNotFound { .. })
        ));
    }
}
