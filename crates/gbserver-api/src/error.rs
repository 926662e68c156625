//! Mapping of domain errors onto HTTP responses

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use gbserver_core::{ErrorReport, GbError, GbErrorKind};

/// JSON error body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> &str {
        &self.body.code
    }
}

/// Status code for a domain error kind
pub fn status_for(kind: GbErrorKind) -> StatusCode {
    match kind {
        GbErrorKind::OrganizationNotFound
        | GbErrorKind::OwnerNotFound
        | GbErrorKind::RepositoryNotFound
        | GbErrorKind::BranchNotFound
        | GbErrorKind::NoBranches
        | GbErrorKind::PullRequestNotFound => StatusCode::NOT_FOUND,
        GbErrorKind::RepositoryAlreadyExists
        | GbErrorKind::BranchAlreadyExists
        | GbErrorKind::PullRequestAlreadyExists
        | GbErrorKind::PullRequestAlreadyClosed
        | GbErrorKind::InvalidRepositoryName
        | GbErrorKind::InvalidBranchRef
        | GbErrorKind::InvalidHeadRef
        | GbErrorKind::InvalidPullRequestState
        | GbErrorKind::OwnersNotInSameOrganization => StatusCode::BAD_REQUEST,
        GbErrorKind::IntegrityViolation | GbErrorKind::Seed => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<GbError> for ApiError {
    fn from(err: GbError) -> Self {
        let report = ErrorReport::from(err);
        Self {
            status: status_for(report.kind()),
            body: ErrorBody {
                code: report.code().to_string(),
                message: report.message().to_string(),
            },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorBody {
                code: "ERR_INVALID_BODY".to_string(),
                message: rejection.body_text(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
