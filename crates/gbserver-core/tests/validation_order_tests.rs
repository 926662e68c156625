#![allow(clippy::unwrap_used, clippy::expect_used)]

//! The validation chain reports the first missing link: organization, then
//! owner, then repository, then branch.

mod common;

use common::{create_repo_with_branches, new_store};
use gbserver_core::ops::{branch_ops, pull_ops, repo_ops, NewPullRequest, PullRequestUpdate};
use gbserver_core::{BranchKey, GbError, RepoKey, UserKey};

#[test]
fn test_missing_org_and_repo_reports_organization() {
    let mut store = new_store();
    let key = RepoKey::new("nope", "gbuser", "norepo");

    assert!(matches!(
        branch_ops::list_branches(&store, &key),
        Err(GbError::OrganizationNotFound { .. })
    ));
    assert!(matches!(
        repo_ops::delete_repository(&mut store, &key),
        Err(GbError::OrganizationNotFound { .. })
    ));
    assert!(matches!(
        pull_ops::list_pull_requests(&store, &key),
        Err(GbError::OrganizationNotFound { .. })
    ));
    assert!(matches!(
        repo_ops::list_repositories(&store, &UserKey::new("nope", "gbuser")),
        Err(GbError::OrganizationNotFound { .. })
    ));
}

#[test]
fn test_missing_owner_and_repo_reports_owner() {
    let mut store = new_store();
    let key = RepoKey::new("gborg", "ghost", "norepo");

    assert!(matches!(
        branch_ops::create_branch(&mut store, &key, "refs/heads/x", ""),
        Err(GbError::OwnerNotFound { .. })
    ));
    assert!(matches!(
        repo_ops::create_repository(&mut store, &key, ""),
        Err(GbError::OwnerNotFound { .. })
    ));
}

#[test]
fn test_missing_repo_precedes_invalid_ref() {
    let mut store = new_store();
    let result = branch_ops::create_branch(
        &mut store,
        &RepoKey::new("gborg", "gbuser", "norepo"),
        "not-a-ref",
        "",
    );
    assert!(matches!(result, Err(GbError::RepositoryNotFound { .. })));
}

#[test]
fn test_missing_repo_precedes_branch_lookup() {
    let mut store = new_store();
    let result = branch_ops::delete_branch(&mut store, &BranchKey::new("gborg", "gbuser", "norepo", "b"));
    assert!(matches!(result, Err(GbError::RepositoryNotFound { .. })));
}

#[test]
fn test_repository_owned_by_other_user_is_not_found() {
    let mut store = new_store();
    create_repo_with_branches(&mut store, "mine", &[("master", "")]);
    let result = branch_ops::list_branches(&store, &RepoKey::new("gborg", "otheruser", "mine"));
    assert!(matches!(result, Err(GbError::RepositoryNotFound { .. })));
}

#[test]
fn test_pull_request_ops_validate_repository_first() {
    let mut store = new_store();
    let key = RepoKey::new("gborg", "gbuser", "norepo");

    let create = pull_ops::create_pull_request(
        &mut store,
        &key,
        &NewPullRequest {
            head: "malformed".to_string(),
            ..Default::default()
        },
    );
    assert!(matches!(create, Err(GbError::RepositoryNotFound { .. })));

    let update = pull_ops::update_pull_request(
        &mut store,
        &key,
        "1",
        &PullRequestUpdate {
            state: "bogus".to_string(),
            ..Default::default()
        },
    );
    assert!(matches!(update, Err(GbError::RepositoryNotFound { .. })));
}

#[test]
fn test_failed_operations_leave_store_unchanged() {
    let mut store = new_store();
    let key = create_repo_with_branches(&mut store, "r", &[("master", "")]);
    let before = format!("{:?}", store.get_repository(&key).unwrap());

    let _ = branch_ops::create_branch(&mut store, &key, "refs/heads/master", "");
    let _ = branch_ops::create_branch(&mut store, &key, "bad", "");
    let _ = pull_ops::create_pull_request(
        &mut store,
        &key,
        &NewPullRequest {
            head: "gbuser:missing".to_string(),
            base: "master".to_string(),
            ..Default::default()
        },
    );

    assert_eq!(format!("{:?}", store.get_repository(&key).unwrap()), before);
    assert_eq!(store.branch_count(), 1);
    assert_eq!(store.pull_request_count(), 0);
}
