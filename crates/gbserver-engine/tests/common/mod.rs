#![allow(clippy::unwrap_used, clippy::expect_used)]

use gbserver_core::ops::DEFAULT_BASE_URL;
use gbserver_core::seed::load_default_seed;
use gbserver_engine::dto::{CreateBranchRequest, CreateRepoRequest, PullRequestRequest};
use gbserver_engine::GbService;

/// Service over the default fixture (gborg / gbuser / gbrepo)
#[allow(dead_code)]
pub fn seeded_service() -> GbService {
    GbService::from_store(load_default_seed(DEFAULT_BASE_URL).unwrap())
}

#[allow(dead_code)]
pub fn repo_request(name: &str) -> CreateRepoRequest {
    CreateRepoRequest {
        name: name.to_string(),
        description: String::new(),
    }
}

#[allow(dead_code)]
pub fn branch_request(name: &str, sha: &str) -> CreateBranchRequest {
    CreateBranchRequest {
        reference: format!("refs/heads/{}", name),
        sha: sha.to_string(),
    }
}

#[allow(dead_code)]
pub fn open_request(head: &str, base: &str) -> PullRequestRequest {
    PullRequestRequest {
        title: Some("Amazing new feature".to_string()),
        body: Some("Please pull these awesome changes in!".to_string()),
        head: head.to_string(),
        base: base.to_string(),
        state: String::new(),
    }
}

#[allow(dead_code)]
pub fn state_request(state: &str) -> PullRequestRequest {
    PullRequestRequest {
        state: state.to_string(),
        ..Default::default()
    }
}
