use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;

use gbserver_engine::dto::{CreateRepoRequest, RepoResponse};

use crate::error::ApiError;
use crate::AppState;

pub async fn list(
    State(state): State<AppState>,
    Path((org, owner)): Path<(String, String)>,
) -> Result<Json<Vec<RepoResponse>>, ApiError> {
    Ok(Json(state.service.list_repositories(&org, &owner)?))
}

pub async fn create(
    State(state): State<AppState>,
    Path((org, owner)): Path<(String, String)>,
    payload: Result<Json<CreateRepoRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RepoResponse>), ApiError> {
    let Json(request) = payload?;
    let repo = state.service.create_repository(&org, &owner, &request)?;
    Ok((StatusCode::CREATED, Json(repo)))
}

pub async fn delete(
    State(state): State<AppState>,
    Path((org, owner, repo)): Path<(String, String, String)>,
) -> Result<StatusCode, ApiError> {
    state.service.delete_repository(&org, &owner, &repo)?;
    Ok(StatusCode::NO_CONTENT)
}
