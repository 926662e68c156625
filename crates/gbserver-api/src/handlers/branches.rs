use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;

use gbserver_engine::dto::{BranchResponse, CreateBranchRequest, CreateBranchResponse};

use crate::error::ApiError;
use crate::AppState;

pub async fn list(
    State(state): State<AppState>,
    Path((org, owner, repo)): Path<(String, String, String)>,
) -> Result<Json<Vec<BranchResponse>>, ApiError> {
    Ok(Json(state.service.list_branches(&org, &owner, &repo)?))
}

pub async fn create(
    State(state): State<AppState>,
    Path((org, owner, repo)): Path<(String, String, String)>,
    payload: Result<Json<CreateBranchRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateBranchResponse>), ApiError> {
    let Json(request) = payload?;
    let branch = state.service.create_branch(&org, &owner, &repo, &request)?;
    Ok((StatusCode::CREATED, Json(branch)))
}

/// `branch` is the plain branch name, not `refs/heads/<name>`.
pub async fn delete(
    State(state): State<AppState>,
    Path((org, owner, repo, branch)): Path<(String, String, String, String)>,
) -> Result<StatusCode, ApiError> {
    state.service.delete_branch(&org, &owner, &repo, &branch)?;
    Ok(StatusCode::NO_CONTENT)
}
