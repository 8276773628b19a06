//! Project endpoint handlers.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::{check_auth, error_response, SharedState};
use crate::models::ProjectsOrg;
use crate::Project;

/// Response for listing projects.
#[derive(Debug, Serialize)]
struct ListProjectsResponse {
    org: ProjectsOrg,
    projects: Vec<Project>,
}

/// POST /org/{id}/projects
///
/// The filter body is accepted but not applied.
pub async fn list_projects(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let state = state.read().await;
    if let Err(denied) = check_auth(&state, &headers) {
        return denied;
    }

    let Some(org) = state.get_org(&id) else {
        return error_response(StatusCode::NOT_FOUND, format!("Org {id} not found"));
    };

    (
        StatusCode::OK,
        Json(ListProjectsResponse {
            org: ProjectsOrg {
                id: org.id.clone(),
                name: org.name.clone(),
            },
            projects: state.list_projects(&id),
        }),
    )
        .into_response()
}
