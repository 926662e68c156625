//! gbserver Core - in-memory entity store and invariant-enforcing operations
//!
//! This crate provides the foundational data structures and operations for the
//! gbserver mock hosting platform:
//! - Organization, User, Repository, Branch and PullRequest models keyed by
//!   structured composite keys
//! - A single-lock shared store (`SharedStore`) guarding the whole entity graph
//! - The validation chain (org -> owner -> repo -> branch) and cross-org checks
//! - Repository, branch and pull-request operations with cascade semantics
//! - Identifier generation (repository counters, opaque IDs, PR content hashes)
//! - Seed import and the structured logging facility

pub mod errors;
pub mod ids;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod rules;
pub mod seed;

// Re-export commonly used types
pub use errors::{ErrorReport, GbError, GbErrorKind, Result};
pub use model::{
    Branch, BranchKey, ChangeStats, CommitDetails, HeadRef, Organization, PullRequest,
    PullRequestState, RepoKey, Repository, User, UserKey,
};
pub use ops::{SharedStore, Store};

// Canonical log field names, re-exported for the logging macros
pub use gbserver_core_types::schema;
