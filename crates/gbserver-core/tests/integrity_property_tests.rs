#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Referential integrity holds after any sequence of operations, successful
//! or not.

mod common;

use common::new_store;
use gbserver_core::ops::{branch_ops, pull_ops, repo_ops, NewPullRequest, PullRequestUpdate};
use gbserver_core::rules::validate_store;
use gbserver_core::{RepoKey, Store};
use proptest::prelude::*;

const OWNERS: [&str; 2] = ["gbuser", "otheruser"];
const REPOS: [&str; 3] = ["alpha", "beta", "gamma"];
const BRANCHES: [&str; 3] = ["master", "dev", "feature"];
const STATES: [&str; 3] = ["closed", "approved", "open"];

#[derive(Debug, Clone)]
enum Op {
    CreateRepo(usize, usize),
    DeleteRepo(usize, usize),
    CreateBranch(usize, usize, usize),
    DeleteBranch(usize, usize, usize),
    OpenPullRequest(usize, usize, usize, usize),
    UpdatePullRequest(usize, usize, usize, usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..2usize, 0..3usize).prop_map(|(o, r)| Op::CreateRepo(o, r)),
        (0..2usize, 0..3usize).prop_map(|(o, r)| Op::DeleteRepo(o, r)),
        (0..2usize, 0..3usize, 0..3usize).prop_map(|(o, r, b)| Op::CreateBranch(o, r, b)),
        (0..2usize, 0..3usize, 0..3usize).prop_map(|(o, r, b)| Op::DeleteBranch(o, r, b)),
        (0..2usize, 0..3usize, 0..3usize, 0..3usize)
            .prop_map(|(o, r, h, b)| Op::OpenPullRequest(o, r, h, b)),
        (0..2usize, 0..3usize, 0..4usize, 0..3usize)
            .prop_map(|(o, r, i, s)| Op::UpdatePullRequest(o, r, i, s)),
    ]
}

fn key(owner: usize, repo: usize) -> RepoKey {
    RepoKey::new("gborg", OWNERS[owner], REPOS[repo])
}

fn apply(store: &mut Store, op: &Op) {
    // Individual failures are expected; only the invariants matter here
    let _ = match op {
        Op::CreateRepo(o, r) => repo_ops::create_repository(store, &key(*o, *r), "").map(|_| ()),
        Op::DeleteRepo(o, r) => repo_ops::delete_repository(store, &key(*o, *r)).map(|_| ()),
        Op::CreateBranch(o, r, b) => branch_ops::create_branch(
            store,
            &key(*o, *r),
            &format!("refs/heads/{}", BRANCHES[*b]),
            "",
        )
        .map(|_| ()),
        Op::DeleteBranch(o, r, b) => {
            branch_ops::delete_branch(store, &key(*o, *r).branch(BRANCHES[*b])).map(|_| ())
        }
        Op::OpenPullRequest(o, r, h, b) => pull_ops::create_pull_request(
            store,
            &key(*o, *r),
            &NewPullRequest {
                title: "t".to_string(),
                body: String::new(),
                head: format!("{}:{}", OWNERS[*o], BRANCHES[*h]),
                base: BRANCHES[*b].to_string(),
            },
        )
        .map(|_| ()),
        Op::UpdatePullRequest(o, r, i, s) => {
            let repo_key = key(*o, *r);
            let id = store
                .get_repository(&repo_key)
                .ok()
                .and_then(|repo| repo.pull_request_ids.get(*i).cloned())
                .unwrap_or_default();
            pull_ops::update_pull_request(
                store,
                &repo_key,
                &id,
                &PullRequestUpdate {
                    state: STATES[*s].to_string(),
                    ..Default::default()
                },
            )
        }
    };
}

proptest! {
    #[test]
    fn prop_store_invariants_hold(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let mut store = new_store();
        for op in &ops {
            apply(&mut store, op);
            prop_assert!(validate_store(&store).is_ok(), "violated after {:?}: {:?}", op, validate_store(&store));
        }
    }

    #[test]
    fn prop_repository_ids_strictly_increase(count in 1usize..20) {
        let mut store = new_store();
        let mut last = 0;
        for i in 0..count {
            let id = repo_ops::create_repository(
                &mut store,
                &RepoKey::new("gborg", "gbuser", format!("repo{}", i)),
                "",
            )
            .unwrap();
            prop_assert!(id > last);
            last = id;
        }
        prop_assert_eq!(store.get_organization("gborg").unwrap().repository_counter, count as u64);
    }
}
