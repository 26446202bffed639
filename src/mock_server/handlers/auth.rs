//! GitHub token exchange handler.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::mock_server::state::MockState;

/// Body of `POST /auth/github`.
#[derive(Debug, Deserialize)]
pub struct GithubAuthRequest {
    pub github_token: String,
}

/// POST /auth/github
pub async fn auth_github(
    State(state): State<Arc<RwLock<MockState>>>,
    Json(body): Json<GithubAuthRequest>,
) -> Response {
    let state = state.read().await;

    match state.github_tokens.get(&body.github_token) {
        Some(travis_token) => (
            StatusCode::OK,
            Json(serde_json::json!({ "access_token": travis_token })),
        )
            .into_response(),
        None => (
            StatusCode::FORBIDDEN,
            Json(serde_json::json!({ "error": "not a Travis user" })),
        )
            .into_response(),
    }
}
