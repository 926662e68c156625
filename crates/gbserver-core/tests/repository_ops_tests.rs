#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{create_repo_with_branches, new_store, repo_key};
use gbserver_core::ops::{pull_ops, repo_ops, NewPullRequest};
use gbserver_core::rules::validate_store;
use gbserver_core::{GbError, RepoKey, UserKey};

// ===== LIST REPOSITORY TESTS =====

#[test]
fn test_list_repositories_in_creation_order() {
    let mut store = new_store();
    repo_ops::create_repository(&mut store, &repo_key("first"), "").unwrap();
    repo_ops::create_repository(&mut store, &repo_key("second"), "").unwrap();

    let repos = repo_ops::list_repositories(&store, &UserKey::new("gborg", "gbuser")).unwrap();
    let names: Vec<&str> = repos.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["first", "second"]);
}

#[test]
fn test_list_repositories_empty_owner() {
    let store = new_store();
    let repos = repo_ops::list_repositories(&store, &UserKey::new("gborg", "otheruser")).unwrap();
    assert!(repos.is_empty());
}

#[test]
fn test_list_repositories_unknown_owner() {
    let store = new_store();
    let result = repo_ops::list_repositories(&store, &UserKey::new("gborg", "ghost"));
    assert!(matches!(result, Err(GbError::OwnerNotFound { .. })));
}

// ===== CREATE REPOSITORY TESTS =====

#[test]
fn test_create_repository_allocates_ids_from_org_counter() {
    let mut store = new_store();
    let first = repo_ops::create_repository(&mut store, &repo_key("a"), "").unwrap();
    let second = repo_ops::create_repository(
        &mut store,
        &RepoKey::new("gborg", "otheruser", "b"),
        "",
    )
    .unwrap();

    assert_eq!(first, 1);
    assert_eq!(second, 2);
    assert_eq!(store.get_organization("gborg").unwrap().repository_counter, 2);
}

#[test]
fn test_create_repository_updates_owner_and_org_lists() {
    let mut store = new_store();
    repo_ops::create_repository(&mut store, &repo_key("testrepo"), "desc").unwrap();

    let repo = store.get_repository(&repo_key("testrepo")).unwrap();
    assert_eq!(repo.description, "desc");
    assert_eq!(repo.node_id.len(), 23);
    assert!(repo.branches.is_empty());
    assert!(store
        .get_user(&UserKey::new("gborg", "gbuser"))
        .unwrap()
        .owns("testrepo"));
    assert!(store
        .get_organization("gborg")
        .unwrap()
        .repositories
        .contains(&"testrepo".to_string()));
    validate_store(&store).unwrap();
}

#[test]
fn test_create_repository_duplicate_fails() {
    let mut store = new_store();
    repo_ops::create_repository(&mut store, &repo_key("gbrepo"), "").unwrap();
    let result = repo_ops::create_repository(&mut store, &repo_key("gbrepo"), "");
    assert!(matches!(result, Err(GbError::RepositoryAlreadyExists { .. })));
    assert_eq!(store.get_organization("gborg").unwrap().repository_counter, 1);
}

#[test]
fn test_same_name_under_different_owners_is_allowed() {
    let mut store = new_store();
    repo_ops::create_repository(&mut store, &repo_key("shared"), "").unwrap();
    repo_ops::create_repository(&mut store, &RepoKey::new("gborg", "otheruser", "shared"), "")
        .unwrap();
    validate_store(&store).unwrap();
}

#[test]
fn test_create_repository_rejects_invalid_names() {
    let mut store = new_store();
    for name in ["", "a/b"] {
        let result = repo_ops::create_repository(&mut store, &repo_key(name), "");
        assert!(matches!(result, Err(GbError::InvalidRepositoryName { .. })));
    }
    assert_eq!(store.repository_count(), 0);
}

// ===== DELETE REPOSITORY TESTS =====

#[test]
fn test_delete_repository_cascades_branches_and_pull_requests() {
    let mut store = new_store();
    let key = create_repo_with_branches(&mut store, "doomed", &[("master", ""), ("feature", "")]);
    pull_ops::create_pull_request(
        &mut store,
        &key,
        &NewPullRequest {
            title: "t".to_string(),
            body: String::new(),
            head: "gbuser:feature".to_string(),
            base: "master".to_string(),
        },
    )
    .unwrap();

    let removed = repo_ops::delete_repository(&mut store, &key).unwrap();
    assert_eq!(removed.branches.len(), 2);

    assert_eq!(store.branch_count(), 0);
    assert_eq!(store.pull_request_count(), 0);
    assert!(store.get_organization("gborg").unwrap().repositories.is_empty());
    assert!(!store
        .get_user(&UserKey::new("gborg", "gbuser"))
        .unwrap()
        .owns("doomed"));
    validate_store(&store).unwrap();
}

#[test]
fn test_delete_repository_keeps_counter() {
    let mut store = new_store();
    repo_ops::create_repository(&mut store, &repo_key("a"), "").unwrap();
    repo_ops::delete_repository(&mut store, &repo_key("a")).unwrap();
    let id = repo_ops::create_repository(&mut store, &repo_key("a"), "").unwrap();
    assert_eq!(id, 2);
}

#[test]
fn test_delete_repository_unknown() {
    let mut store = new_store();
    let result = repo_ops::delete_repository(&mut store, &repo_key("nope"));
    assert!(matches!(result, Err(GbError::RepositoryNotFound { .. })));
}
