#![allow(clippy::unwrap_used, clippy::expect_used)]

use gbserver_core::ops::{branch_ops, org_ops, repo_ops, Store};
use gbserver_core::{RepoKey, User};

/// Empty store with one organization `gborg` holding `gbuser` and `otheruser`
#[allow(dead_code)]
pub fn new_store() -> Store {
    let mut store = Store::new();
    org_ops::create_organization(&mut store, 1, "gborg").unwrap();
    org_ops::add_user(&mut store, "gborg", User::new(1, "gbuser", "MDQ6VXNlcjE=")).unwrap();
    org_ops::add_user(&mut store, "gborg", User::new(2, "otheruser", "MDQ6VXNlcjI=")).unwrap();
    store
}

/// `new_store` plus a second organization `farorg` holding `faruser`
#[allow(dead_code)]
pub fn new_store_with_second_org() -> Store {
    let mut store = new_store();
    org_ops::create_organization(&mut store, 2, "farorg").unwrap();
    org_ops::add_user(&mut store, "farorg", User::new(3, "faruser", "MDQ6VXNlcjM=")).unwrap();
    store
}

#[allow(dead_code)]
pub fn repo_key(repo: &str) -> RepoKey {
    RepoKey::new("gborg", "gbuser", repo)
}

/// Create `gborg/gbuser/<repo>` with the given branches
#[allow(dead_code)]
pub fn create_repo_with_branches(store: &mut Store, repo: &str, branches: &[(&str, &str)]) -> RepoKey {
    let key = repo_key(repo);
    repo_ops::create_repository(store, &key, "test repo").unwrap();
    for (name, sha) in branches {
        branch_ops::create_branch(store, &key, &format!("refs/heads/{}", name), sha).unwrap();
    }
    key
}
