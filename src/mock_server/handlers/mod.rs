//! HTTP request handlers for the mock server.

pub mod auth;
pub mod repos;
pub mod users;

pub use auth::*;
pub use repos::*;
pub use users::*;

use axum::{
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::mock_server::state::MockState;

/// Build a Travis v3 error response.
pub(crate) fn travis_error(status: StatusCode, error_type: &str, message: &str) -> Response {
    (
        status,
        Json(serde_json::json!({
            "@type": "error",
            "error_type": error_type,
            "error_message": message
        })),
    )
        .into_response()
}

/// Reject the request unless it carries the token the state requires.
pub(crate) fn check_auth(state: &MockState, headers: &HeaderMap) -> Result<(), Response> {
    let authorization = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    if state.is_authorized(authorization) {
        Ok(())
    } else {
        Err(travis_error(
            StatusCode::FORBIDDEN,
            "login_required",
            "login required",
        ))
    }
}
