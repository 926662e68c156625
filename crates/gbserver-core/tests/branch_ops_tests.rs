#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{create_repo_with_branches, new_store, repo_key};
use gbserver_core::ops::{branch_ops, pull_ops, repo_ops, NewPullRequest};
use gbserver_core::rules::validate_store;
use gbserver_core::{BranchKey, GbError};

fn open_pr(head: &str, base: &str) -> NewPullRequest {
    NewPullRequest {
        title: "Amazing new feature".to_string(),
        body: "Please pull these awesome changes in!".to_string(),
        head: head.to_string(),
        base: base.to_string(),
    }
}

// ===== LIST BRANCH TESTS =====

#[test]
fn test_list_branches_in_creation_order() {
    let mut store = new_store();
    let key = create_repo_with_branches(&mut store, "r", &[("master", "a1"), ("dev", "b2")]);

    let branches = branch_ops::list_branches(&store, &key).unwrap();
    let names: Vec<&str> = branches.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["master", "dev"]);
    assert_eq!(branches[0].commit.sha, "a1");
}

#[test]
fn test_list_branches_empty_repository_is_distinct_from_missing() {
    let mut store = new_store();
    repo_ops::create_repository(&mut store, &repo_key("empty"), "").unwrap();

    assert!(matches!(
        branch_ops::list_branches(&store, &repo_key("empty")),
        Err(GbError::NoBranches { .. })
    ));
    assert!(matches!(
        branch_ops::list_branches(&store, &repo_key("missing")),
        Err(GbError::RepositoryNotFound { .. })
    ));
}

// ===== CREATE BRANCH TESTS =====

#[test]
fn test_create_branch_sets_ids_urls_and_defaults() {
    let mut store = new_store();
    let key = create_repo_with_branches(&mut store, "testrepo", &[("master", "def456")]);
    let branch_key = branch_ops::create_branch(&mut store, &key, "refs/heads/featureCD", "abc123")
        .unwrap();

    let branch = store.get_branch(&branch_key).unwrap();
    assert_eq!(branch.id, 2);
    assert_eq!(branch.name, "featureCD");
    assert!(!branch.protected);
    assert!(branch.pull_request_id.is_none());
    assert_eq!(branch.commit.sha, "abc123");
    assert_eq!(
        branch.url,
        "https://api.gbserver.com/repos/gbuser/testrepo/git/refs/heads/featureCD"
    );
    assert!(branch.commit.url.ends_with("/git/commits/abc123"));
}

#[test]
fn test_create_branch_generates_sha_when_empty() {
    let mut store = new_store();
    let key = create_repo_with_branches(&mut store, "r", &[]);
    let branch_key = branch_ops::create_branch(&mut store, &key, "refs/heads/main", "").unwrap();
    assert_eq!(store.get_branch(&branch_key).unwrap().commit.sha.len(), 40);
}

#[test]
fn test_create_branch_duplicate_fails() {
    let mut store = new_store();
    let key = create_repo_with_branches(&mut store, "r", &[("featureX", "")]);
    let result = branch_ops::create_branch(&mut store, &key, "refs/heads/featureX", "");
    assert!(matches!(result, Err(GbError::BranchAlreadyExists { .. })));
    assert_eq!(store.get_repository(&key).unwrap().branches.len(), 1);
}

#[test]
fn test_create_branch_invalid_ref() {
    let mut store = new_store();
    let key = create_repo_with_branches(&mut store, "r", &[]);
    let result = branch_ops::create_branch(&mut store, &key, "featureX", "");
    assert!(matches!(result, Err(GbError::InvalidBranchRef { .. })));
    assert_eq!(store.branch_count(), 0);
}

// ===== DELETE BRANCH TESTS =====

#[test]
fn test_delete_branch_without_pull_request() {
    let mut store = new_store();
    let key = create_repo_with_branches(&mut store, "r", &[("master", ""), ("dev", "")]);

    let cascaded = branch_ops::delete_branch(&mut store, &key.branch("dev")).unwrap();
    assert!(cascaded.is_none());
    assert_eq!(store.get_repository(&key).unwrap().branches, vec!["master".to_string()]);
    validate_store(&store).unwrap();
}

#[test]
fn test_delete_branch_cascades_open_pull_request() {
    let mut store = new_store();
    let key = create_repo_with_branches(&mut store, "r", &[("master", ""), ("feature", "")]);
    let id = pull_ops::create_pull_request(&mut store, &key, &open_pr("gbuser:feature", "master"))
        .unwrap();

    let cascaded = branch_ops::delete_branch(&mut store, &key.branch("feature")).unwrap();
    assert_eq!(cascaded.map(|pr| pr.id), Some(id.clone()));

    assert!(store.get_pull_request(&id).is_err());
    assert!(!store.get_repository(&key).unwrap().has_pull_request(&id));
    assert!(pull_ops::list_pull_requests(&store, &key).unwrap().is_empty());
    validate_store(&store).unwrap();
}

#[test]
fn test_delete_branch_unknown() {
    let mut store = new_store();
    create_repo_with_branches(&mut store, "r", &[("master", "")]);
    let result = branch_ops::delete_branch(&mut store, &BranchKey::new("gborg", "gbuser", "r", "nope"));
    assert!(matches!(result, Err(GbError::BranchNotFound { .. })));
}
