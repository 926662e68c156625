use std::collections::HashMap;

use crate::errors::{GbError, Result};
use crate::model::{BranchKey, RepoKey};
use crate::ops::Store;

/// Find branch names listed by a repository with no Branch entity
///
/// Returns list of (repo_key, branch_name) tuples
pub fn find_listed_branches_without_entity(store: &Store) -> Vec<(RepoKey, String)> {
    let mut missing = Vec::new();

    for (key, repo) in &store.repositories {
        for name in &repo.branches {
            if !store.branches.contains_key(&key.branch(name.clone())) {
                missing.push((key.clone(), name.clone()));
            }
        }
    }

    missing
}

/// Find Branch entities that their repository does not list
pub fn find_unlisted_branches(store: &Store) -> Vec<BranchKey> {
    store
        .branches
        .keys()
        .filter(|key| match store.repositories.get(&key.repo) {
            Some(repo) => !repo.has_branch(&key.branch),
            None => true,
        })
        .cloned()
        .collect()
}

/// Find repositories missing from their owner's or organization's list,
/// and owner list entries with no Repository entity
pub fn find_repository_list_mismatches(store: &Store) -> Vec<RepoKey> {
    let mut mismatches = Vec::new();

    for (key, repo) in &store.repositories {
        let listed_by_owner = store
            .users
            .get(&key.owner_key())
            .map(|user| user.owns(&repo.name))
            .unwrap_or(false);
        if !listed_by_owner {
            mismatches.push(key.clone());
        }
    }

    for (user_key, user) in &store.users {
        for name in &user.repositories {
            let key = RepoKey::new(user_key.org.clone(), user_key.login.clone(), name.clone());
            if !store.repositories.contains_key(&key) {
                mismatches.push(key);
            }
        }
    }

    mismatches
}

/// Find organizations whose repository-name list disagrees with the
/// Repository collection
///
/// Returns list of (org, repo_name, listed_count, actual_count) tuples
pub fn find_organization_list_mismatches(store: &Store) -> Vec<(String, String, usize, usize)> {
    let mut actual: HashMap<(&str, &str), usize> = HashMap::new();
    for key in store.repositories.keys() {
        *actual.entry((key.org.as_str(), key.repo.as_str())).or_default() += 1;
    }

    let mut listed: HashMap<(&str, &str), usize> = HashMap::new();
    for org in store.organizations.values() {
        for name in &org.repositories {
            *listed.entry((org.name.as_str(), name.as_str())).or_default() += 1;
        }
    }

    let mut mismatches = Vec::new();
    for (&(org, name), &count) in &listed {
        let real = actual.get(&(org, name)).copied().unwrap_or(0);
        if real != count {
            mismatches.push((org.to_string(), name.to_string(), count, real));
        }
    }
    for (&(org, name), &real) in &actual {
        if !listed.contains_key(&(org, name)) {
            mismatches.push((org.to_string(), name.to_string(), 0, real));
        }
    }

    mismatches
}

/// Find pull requests that are not reachable from their repository, and
/// repository PR-ID entries with no PullRequest entity
///
/// Returns list of (repo_key, pull_request_id) tuples
pub fn find_dangling_pull_requests(store: &Store) -> Vec<(RepoKey, String)> {
    let mut dangling = Vec::new();

    for pr in store.pull_requests.values() {
        let key = RepoKey::new(pr.org.clone(), pr.owner.clone(), pr.repo.clone());
        let listed = store
            .repositories
            .get(&key)
            .map(|repo| repo.has_pull_request(&pr.id))
            .unwrap_or(false);
        if !listed {
            dangling.push((key, pr.id.clone()));
        }
    }

    for (key, repo) in &store.repositories {
        for id in &repo.pull_request_ids {
            if !store.pull_requests.contains_key(id) {
                dangling.push((key.clone(), id.clone()));
            }
        }
    }

    dangling
}

/// Find branch back-references that disagree with the open pull requests
///
/// A branch must point at a PR iff exactly one open PR uses it as head.
/// Returns list of (branch_key, description) tuples
pub fn find_back_reference_violations(store: &Store) -> Vec<(BranchKey, String)> {
    let mut violations = Vec::new();

    let mut open_by_head: HashMap<BranchKey, Vec<&str>> = HashMap::new();
    for pr in store.pull_requests.values().filter(|pr| pr.is_open()) {
        let head = BranchKey::new(
            pr.org.clone(),
            pr.owner.clone(),
            pr.repo.clone(),
            pr.head.branch.clone(),
        );
        open_by_head.entry(head).or_default().push(pr.id.as_str());
    }

    for (key, ids) in &open_by_head {
        if ids.len() > 1 {
            violations.push((
                key.clone(),
                format!("{} open pull requests share this head", ids.len()),
            ));
        }
        match store.branches.get(key) {
            None => violations.push((key.clone(), "open pull request head is missing".to_string())),
            Some(branch) => {
                if !ids.iter().any(|id| branch.pull_request_id.as_deref() == Some(*id)) {
                    violations.push((
                        key.clone(),
                        "branch does not reference its open pull request".to_string(),
                    ));
                }
            }
        }
    }

    for (key, branch) in &store.branches {
        if branch.pull_request_id.is_some() && !open_by_head.contains_key(key) {
            violations.push((
                key.clone(),
                "branch references a pull request that is not open on it".to_string(),
            ));
        }
    }

    violations
}

/// Validate every store invariant
///
/// # Errors
///
/// Returns the first violation found as `IntegrityViolation`. For
/// exhaustive reporting, call the individual `find_*` functions.
pub fn validate_store(store: &Store) -> Result<()> {
    if let Some((repo, branch)) = find_listed_branches_without_entity(store).first() {
        return Err(violation(format!(
            "repository {} lists branch {} with no entity",
            repo, branch
        )));
    }

    if let Some(key) = find_unlisted_branches(store).first() {
        return Err(violation(format!(
            "branch {} is not listed by its repository",
            key
        )));
    }

    if let Some(key) = find_repository_list_mismatches(store).first() {
        return Err(violation(format!(
            "repository {} disagrees with its owner's list",
            key
        )));
    }

    if let Some((org, name, listed, actual)) = find_organization_list_mismatches(store).first() {
        return Err(violation(format!(
            "organization {} lists repository {} {} time(s) but {} exist",
            org, name, listed, actual
        )));
    }

    if let Some((repo, id)) = find_dangling_pull_requests(store).first() {
        return Err(violation(format!(
            "pull request {} is dangling from repository {}",
            id, repo
        )));
    }

    if let Some((key, what)) = find_back_reference_violations(store).first() {
        return Err(violation(format!("{}: {}", key, what)));
    }

    Ok(())
}

fn violation(reason: String) -> GbError {
    GbError::IntegrityViolation { reason }
}
