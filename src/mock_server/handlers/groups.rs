//! Group endpoint handlers.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use super::{check_auth, error_response, SharedState};

/// GET /group/{id}/members
pub async fn list_group_members(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let state = state.read().await;
    if let Err(denied) = check_auth(&state, &headers) {
        return denied;
    }

    if !state.groups.contains_key(&id) {
        return error_response(StatusCode::NOT_FOUND, format!("Group {id} not found"));
    }

    let members = state.group_members.get(&id).cloned().unwrap_or_default();
    (StatusCode::OK, Json(members)).into_response()
}
