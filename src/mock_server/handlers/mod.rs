//! HTTP request handlers for the mock server.

pub mod groups;
pub mod orgs;
pub mod projects;
pub mod reporting;

pub use groups::*;
pub use orgs::*;
pub use projects::*;
pub use reporting::*;

use std::sync::Arc;

use axum::{
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tokio::sync::RwLock;

use crate::mock_server::state::MockState;

/// State handle shared by all handlers.
pub type SharedState = Arc<RwLock<MockState>>;

/// JSON error body in the shape the Snyk API uses.
pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let message = message.into();
    (
        status,
        Json(serde_json::json!({
            "code": status.as_u16(),
            "message": message,
            "error": message,
        })),
    )
        .into_response()
}

/// Reject requests whose token does not match the configured one.
pub(crate) fn check_auth(state: &MockState, headers: &HeaderMap) -> Result<(), Response> {
    let authorization = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    if state.is_authorized(authorization) {
        Ok(())
    } else {
        Err(error_response(
            StatusCode::UNAUTHORIZED,
            "Invalid auth token provided",
        ))
    }
}
