//! Reporting endpoint handlers.

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use super::{check_auth, error_response, SharedState};
use crate::{
    IssueGroupBy, IssueSortBy, ListReportingIssuesRequest, ListReportingIssuesResponse, SortOrder,
};

/// Query parameters for the latest issues report.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestIssuesQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub group_by: Option<IssueGroupBy>,
    pub order: Option<SortOrder>,
    pub sort_by: Option<IssueSortBy>,
}

/// Body of the latest issues report.
#[derive(Debug, Default, Deserialize)]
pub struct LatestIssuesBody {
    #[serde(default)]
    pub filters: LatestIssuesFilters,
}

#[derive(Debug, Default, Deserialize)]
pub struct LatestIssuesFilters {
    #[serde(default)]
    pub orgs: Vec<String>,
}

/// POST /v1/reporting/issues/latest
pub async fn list_latest_issues(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(query): Query<LatestIssuesQuery>,
    Json(body): Json<LatestIssuesBody>,
) -> Response {
    let state = state.read().await;
    if let Err(denied) = check_auth(&state, &headers) {
        return denied;
    }

    if body.filters.orgs.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "filters.orgs must not be empty");
    }

    let request = ListReportingIssuesRequest {
        page: query.page,
        per_page: query.per_page,
        group_by: query.group_by,
        order: query.order,
        sort_by: query.sort_by,
    };
    let (results, total) = state.query_issues(&body.filters.orgs, &request);

    (
        StatusCode::OK,
        Json(ListReportingIssuesResponse { results, total }),
    )
        .into_response()
}
