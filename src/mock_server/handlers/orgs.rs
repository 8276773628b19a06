//! Organization endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use super::{check_auth, error_response, SharedState};
use crate::{Organization, OrganizationCreateRequest};

/// Response for listing organizations.
#[derive(Debug, Serialize)]
pub struct ListOrgsResponse {
    pub orgs: Vec<Organization>,
}

/// Query parameters for listing members.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMembersQuery {
    pub include_group_admins: Option<bool>,
}

/// Query parameters for listing pending provisions.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProvisionsQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// GET /orgs
pub async fn list_orgs(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let state = state.read().await;
    if let Err(denied) = check_auth(&state, &headers) {
        return denied;
    }

    (
        StatusCode::OK,
        Json(ListOrgsResponse {
            orgs: state.orgs.clone(),
        }),
    )
        .into_response()
}

/// POST /org
pub async fn create_org(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(request): Json<OrganizationCreateRequest>,
) -> Response {
    let mut state = state.write().await;
    if let Err(denied) = check_auth(&state, &headers) {
        return denied;
    }

    if request.name.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Organization name is required");
    }

    match state.create_org(&request) {
        Some(org) => (StatusCode::CREATED, Json(org)).into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            format!(
                "Group {} not found",
                request.group_id.as_deref().unwrap_or_default()
            ),
        ),
    }
}

/// DELETE /org/{id}
pub async fn delete_org(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let mut state = state.write().await;
    if let Err(denied) = check_auth(&state, &headers) {
        return denied;
    }

    if state.delete_org(&id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        error_response(StatusCode::NOT_FOUND, format!("Org {id} not found"))
    }
}

/// GET /org/{id}/members
pub async fn list_org_members(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Query(query): Query<ListMembersQuery>,
) -> Response {
    let state = state.read().await;
    if let Err(denied) = check_auth(&state, &headers) {
        return denied;
    }

    if state.get_org(&id).is_none() {
        return error_response(StatusCode::NOT_FOUND, format!("Org {id} not found"));
    }

    let members = state.list_members(&id, query.include_group_admins.unwrap_or(false));
    (StatusCode::OK, Json(members)).into_response()
}

/// GET /org/{id}/provision
pub async fn list_provisions(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Query(query): Query<ListProvisionsQuery>,
) -> Response {
    let state = state.read().await;
    if let Err(denied) = check_auth(&state, &headers) {
        return denied;
    }

    if state.get_org(&id).is_none() {
        return error_response(StatusCode::NOT_FOUND, format!("Org {id} not found"));
    }

    let provisions = state.list_provisions(&id, query.page, query.per_page);
    (StatusCode::OK, Json(provisions)).into_response()
}
