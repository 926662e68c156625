pub mod branch_ops;
pub mod org_ops;
pub mod pull_ops;
pub mod repo_ops;
pub mod shared;
pub mod store;

pub use pull_ops::{NewPullRequest, PullRequestUpdate};
pub use shared::SharedStore;
pub use store::{Store, DEFAULT_BASE_URL};
