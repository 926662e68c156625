use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;

use gbserver_engine::dto::{PullRequestRequest, PullRequestResponse};

use crate::error::ApiError;
use crate::AppState;

pub async fn list(
    State(state): State<AppState>,
    Path((org, owner, repo)): Path<(String, String, String)>,
) -> Result<Json<Vec<PullRequestResponse>>, ApiError> {
    Ok(Json(state.service.list_pull_requests(&org, &owner, &repo)?))
}

pub async fn create(
    State(state): State<AppState>,
    Path((org, owner, repo)): Path<(String, String, String)>,
    payload: Result<Json<PullRequestRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PullRequestResponse>), ApiError> {
    let Json(request) = payload?;
    let pr = state
        .service
        .create_pull_request(&org, &owner, &repo, &request)?;
    Ok((StatusCode::CREATED, Json(pr)))
}

pub async fn update(
    State(state): State<AppState>,
    Path((org, owner, repo, pull_id)): Path<(String, String, String, String)>,
    payload: Result<Json<PullRequestRequest>, JsonRejection>,
) -> Result<Json<PullRequestResponse>, ApiError> {
    let Json(request) = payload?;
    let pr = state
        .service
        .update_pull_request(&org, &owner, &repo, &pull_id, &request)?;
    Ok(Json(pr))
}
