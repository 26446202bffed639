//! Repository endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tokio::sync::RwLock;

use super::{check_auth, travis_error};
use crate::mock_server::state::MockState;
use crate::Repository;

/// Query parameters for listing repositories.
#[derive(Debug, Default, Deserialize)]
pub struct ListReposQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    #[serde(rename = "repository.active")]
    pub active: Option<bool>,
}

fn decode_slug(slug: String) -> String {
    urlencoding::decode(&slug)
        .map(|s| s.into_owned())
        .unwrap_or(slug)
}

fn repo_not_found() -> Response {
    travis_error(
        StatusCode::NOT_FOUND,
        "not_found",
        "repository not found (or insufficient access)",
    )
}

/// GET /repo/{slug}
pub async fn get_repo(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path(slug): Path<String>,
) -> Response {
    let slug = decode_slug(slug);
    let state = state.read().await;
    if let Err(denied) = check_auth(&state, &headers) {
        return denied;
    }

    match state.get_repository(&slug) {
        Some(repo) => (StatusCode::OK, Json(repo.clone())).into_response(),
        None => repo_not_found(),
    }
}

/// POST /repo/{slug}/activate
pub async fn activate_repo(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path(slug): Path<String>,
) -> Response {
    set_active(state, headers, slug, true).await
}

/// POST /repo/{slug}/deactivate
pub async fn deactivate_repo(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path(slug): Path<String>,
) -> Response {
    set_active(state, headers, slug, false).await
}

async fn set_active(
    state: Arc<RwLock<MockState>>,
    headers: HeaderMap,
    slug: String,
    active: bool,
) -> Response {
    let slug = decode_slug(slug);
    let mut state = state.write().await;
    if let Err(denied) = check_auth(&state, &headers) {
        return denied;
    }

    match state.set_active(&slug, active) {
        Some(repo) => (StatusCode::OK, Json(repo.clone())).into_response(),
        None => repo_not_found(),
    }
}

/// GET /owner/{login}/repos
pub async fn list_owner_repos(
    State(state): State<Arc<RwLock<MockState>>>,
    headers: HeaderMap,
    Path(login): Path<String>,
    Query(query): Query<ListReposQuery>,
) -> Response {
    let state = state.read().await;
    if let Err(denied) = check_auth(&state, &headers) {
        return denied;
    }

    let limit = query.limit.unwrap_or(25);
    let offset = query.offset.unwrap_or(0);

    let all = state.list_repositories(&login, query.active);
    let count = all.len();

    // Apply pagination
    let start = (offset as usize).min(count);
    let end = (start + limit as usize).min(count);
    let repositories: Vec<Repository> = all[start..end].iter().map(|r| (*r).clone()).collect();

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "@type": "repositories",
            "@pagination": {
                "limit": limit,
                "offset": offset,
                "count": count,
                "is_first": offset == 0,
                "is_last": end >= count
            },
            "repositories": repositories
        })),
    )
        .into_response()
}
