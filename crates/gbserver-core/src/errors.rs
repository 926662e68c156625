use thiserror::Error;

use crate::model::{BranchKey, RepoKey};

/// Result type alias using GbError
pub type Result<T> = std::result::Result<T, GbError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that the transport adapter uses to
/// pick a status code and that the logging facility records as `err.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GbErrorKind {
    // Lookup
    OrganizationNotFound,
    OwnerNotFound,
    RepositoryNotFound,
    BranchNotFound,
    NoBranches,
    PullRequestNotFound,

    // Uniqueness
    RepositoryAlreadyExists,
    BranchAlreadyExists,
    PullRequestAlreadyExists,

    // Input
    InvalidRepositoryName,
    InvalidBranchRef,
    InvalidHeadRef,
    InvalidPullRequestState,

    // Lifecycle / membership
    PullRequestAlreadyClosed,
    OwnersNotInSameOrganization,

    // Store integrity and seeding
    IntegrityViolation,
    Seed,
}

impl GbErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            GbErrorKind::OrganizationNotFound => "ERR_ORGANIZATION_NOT_FOUND",
            GbErrorKind::OwnerNotFound => "ERR_OWNER_NOT_FOUND",
            GbErrorKind::RepositoryNotFound => "ERR_REPOSITORY_NOT_FOUND",
            GbErrorKind::BranchNotFound => "ERR_BRANCH_NOT_FOUND",
            GbErrorKind::NoBranches => "ERR_NO_BRANCHES",
            GbErrorKind::PullRequestNotFound => "ERR_PULL_REQUEST_NOT_FOUND",
            GbErrorKind::RepositoryAlreadyExists => "ERR_REPOSITORY_ALREADY_EXISTS",
            GbErrorKind::BranchAlreadyExists => "ERR_BRANCH_ALREADY_EXISTS",
            GbErrorKind::PullRequestAlreadyExists => "ERR_PULL_REQUEST_ALREADY_EXISTS",
            GbErrorKind::InvalidRepositoryName => "ERR_INVALID_REPOSITORY_NAME",
            GbErrorKind::InvalidBranchRef => "ERR_INVALID_BRANCH_REF",
            GbErrorKind::InvalidHeadRef => "ERR_INVALID_HEAD_REF",
            GbErrorKind::InvalidPullRequestState => "ERR_INVALID_PULL_REQUEST_STATE",
            GbErrorKind::PullRequestAlreadyClosed => "ERR_PULL_REQUEST_ALREADY_CLOSED",
            GbErrorKind::OwnersNotInSameOrganization => "ERR_OWNERS_NOT_IN_SAME_ORGANIZATION",
            GbErrorKind::IntegrityViolation => "ERR_INTEGRITY_VIOLATION",
            GbErrorKind::Seed => "ERR_SEED",
        }
    }

    /// True for the "entity is missing" family of kinds
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            GbErrorKind::OrganizationNotFound
                | GbErrorKind::OwnerNotFound
                | GbErrorKind::RepositoryNotFound
                | GbErrorKind::BranchNotFound
                | GbErrorKind::NoBranches
                | GbErrorKind::PullRequestNotFound
        )
    }
}

/// Structured error report
///
/// Flattened view of a `GbError` with classification fields for programmatic
/// handling. Produced at operation boundaries for logs and transport bodies.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    kind: GbErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    request_id: Option<String>,
    message: String,
}

impl ErrorReport {
    /// Create a new report with the specified kind
    pub fn new(kind: GbErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            request_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> GbErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorReport {}

// ========== End Error Facility ==========

/// Error taxonomy for gbserver operations
///
/// Every variant is a terminal, local condition. Values are comparable so
/// callers can match them exactly.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GbError {
    #[error("organization not found: {org}")]
    OrganizationNotFound { org: String },

    #[error("owner not found: {owner} in organization {org}")]
    OwnerNotFound { org: String, owner: String },

    #[error("repo not found: {key}")]
    RepositoryNotFound { key: RepoKey },

    #[error("repo name already exists: {key}")]
    RepositoryAlreadyExists { key: RepoKey },

    #[error("invalid repository name {name:?}: {reason}")]
    InvalidRepositoryName { name: String, reason: String },

    /// The repository exists but holds no branches
    #[error("no branches found in {key}")]
    NoBranches { key: RepoKey },

    #[error("branch not found: {key}")]
    BranchNotFound { key: BranchKey },

    #[error("branch name already exists: {key}")]
    BranchAlreadyExists { key: BranchKey },

    #[error("invalid branch name {reference:?}. Specify as refs/heads/<branch>")]
    InvalidBranchRef { reference: String },

    #[error("invalid head {head:?}. Specify as <owner>:<branch>")]
    InvalidHeadRef { head: String },

    #[error("no PRs found. Invalid PR id {pull_request_id}")]
    PullRequestNotFound { pull_request_id: String },

    #[error("already PR {pull_request_id} exists on the branch {head}")]
    PullRequestAlreadyExists {
        head: String,
        pull_request_id: String,
    },

    #[error("PR {pull_request_id} is already {state}")]
    PullRequestAlreadyClosed {
        pull_request_id: String,
        state: String,
    },

    #[error("invalid pull request state {state:?}")]
    InvalidPullRequestState { state: String },

    #[error("owners {owner} and {head_owner} are not belonging to same organization {org}")]
    OwnersNotInSameOrganization {
        org: String,
        owner: String,
        head_owner: String,
    },

    /// A store invariant does not hold (reported by the invariant checker)
    #[error("store integrity violation: {reason}")]
    IntegrityViolation { reason: String },

    #[error("seed error: {reason}")]
    Seed { reason: String },
}

impl GbError {
    /// Classify this error
    pub fn kind(&self) -> GbErrorKind {
        match self {
            GbError::OrganizationNotFound { .. } => GbErrorKind::OrganizationNotFound,
            GbError::OwnerNotFound { .. } => GbErrorKind::OwnerNotFound,
            GbError::RepositoryNotFound { .. } => GbErrorKind::RepositoryNotFound,
            GbError::RepositoryAlreadyExists { .. } => GbErrorKind::RepositoryAlreadyExists,
            GbError::InvalidRepositoryName { .. } => GbErrorKind::InvalidRepositoryName,
            GbError::NoBranches { .. } => GbErrorKind::NoBranches,
            GbError::BranchNotFound { .. } => GbErrorKind::BranchNotFound,
            GbError::BranchAlreadyExists { .. } => GbErrorKind::BranchAlreadyExists,
            GbError::InvalidBranchRef { .. } => GbErrorKind::InvalidBranchRef,
            GbError::InvalidHeadRef { .. } => GbErrorKind::InvalidHeadRef,
            GbError::PullRequestNotFound { .. } => GbErrorKind::PullRequestNotFound,
            GbError::PullRequestAlreadyExists { .. } => GbErrorKind::PullRequestAlreadyExists,
            GbError::PullRequestAlreadyClosed { .. } => GbErrorKind::PullRequestAlreadyClosed,
            GbError::InvalidPullRequestState { .. } => GbErrorKind::InvalidPullRequestState,
            GbError::OwnersNotInSameOrganization { .. } => {
                GbErrorKind::OwnersNotInSameOrganization
            }
            GbError::IntegrityViolation { .. } => GbErrorKind::IntegrityViolation,
            GbError::Seed { .. } => GbErrorKind::Seed,
        }
    }

    /// Key of the entity the error is about, when there is one
    pub fn entity_id(&self) -> Option<String> {
        match self {
            GbError::OrganizationNotFound { org } => Some(org.clone()),
            GbError::OwnerNotFound { org, owner } => Some(format!("{}/{}", org, owner)),
            GbError::RepositoryNotFound { key }
            | GbError::RepositoryAlreadyExists { key }
            | GbError::NoBranches { key } => Some(key.to_string()),
            GbError::BranchNotFound { key } | GbError::BranchAlreadyExists { key } => {
                Some(key.to_string())
            }
            GbError::PullRequestNotFound { pull_request_id }
            | GbError::PullRequestAlreadyExists {
                pull_request_id, ..
            }
            | GbError::PullRequestAlreadyClosed {
                pull_request_id, ..
            } => Some(pull_request_id.clone()),
            GbError::InvalidRepositoryName { name, .. } => Some(name.clone()),
            GbError::InvalidBranchRef { .. }
            | GbError::InvalidHeadRef { .. }
            | GbError::InvalidPullRequestState { .. }
            | GbError::OwnersNotInSameOrganization { .. }
            | GbError::IntegrityViolation { .. }
            | GbError::Seed { .. } => None,
        }
    }
}

/// Conversion from GbError to the structured report
impl From<GbError> for ErrorReport {
    fn from(err: GbError) -> Self {
        let report = ErrorReport::new(err.kind()).with_message(err.to_string());
        match err.entity_id() {
            Some(id) => report.with_entity_id(id),
            None => report,
        }
    }
}
