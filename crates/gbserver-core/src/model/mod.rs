pub mod branch;
pub mod keys;
pub mod organization;
pub mod pull_request;
pub mod repository;
pub mod user;

pub use branch::{Branch, CommitDetails};
pub use keys::{BranchKey, RepoKey, UserKey};
pub use organization::Organization;
pub use pull_request::{ChangeStats, HeadRef, PullRequest, PullRequestState};
pub use repository::Repository;
pub use user::User;
