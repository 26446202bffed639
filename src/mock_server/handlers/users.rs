//! User and sync endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tokio::sync::RwLock;

use super::{check_auth, travis_error};
use crate::mock_server::state::MockState;

/// GET /user
pub async fn get_current_user(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
) -> Response {
    let mut state = state.write().await;
    if let Err(denied) = check_auth(&state, &headers) {
        return denied;
    }

    (StatusCode::OK, Json(state.poll_user())).into_response()
}

/// POST /user/{id}/sync
pub async fn sync_user(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response {
    let mut state = state.write().await;
    if let Err(denied) = check_auth(&state, &headers) {
        return denied;
    }

    if state.user.id != id {
        return travis_error(StatusCode::NOT_FOUND, "not_found", "user not found");
    }

    if !state.start_sync() {
        return travis_error(
            StatusCode::CONFLICT,
            "already_syncing",
            "sync already in progress",
        );
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "@type": "user",
            "user": state.user.clone(),
            "sync_type": "sync_user"
        })),
    )
        .into_response()
}
