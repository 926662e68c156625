use axum::extract::State;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use crate::AppState;

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    name: String,
    version: String,
    repositories: usize,
}

/// Report liveness and the number of stored repositories.
pub async fn health(State(state): State<AppState>) -> Json<Health> {
    let repositories = state.service.store().read(|store| store.repository_count());
    Json(Health {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        repositories,
    })
}
