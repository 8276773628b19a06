//! Reporting models and the reporting service.
//!
//! The reporting API returns vulnerability findings together with the
//! projects they affect. When results are grouped by issue, each result lists
//! every affected project in `projects`; otherwise each result refers to one
//! project in `project`.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull, DisplayFromStr, PickFirst};

use crate::client::SnykClient;
use crate::error::Result;
use crate::response::ResponseInfo;

const REPORTING_BASE_PATH: &str = "v1/reporting";

/// Response of [`ReportingService::list_latest_issues`].
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListReportingIssuesResponse {
    /// Results in server order.
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub results: Vec<ListReportingIssueResult>,

    /// Total number of results across all pages.
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub total: u64,
}

/// One issue and the project(s) it was found in.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListReportingIssueResult {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub issue: ReportingIssue,

    /// Affected projects, filled when grouping by issue.
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub projects: Vec<ReportingIssueProject>,

    /// Affected project, filled when not grouping.
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub project: ReportingIssueProject,

    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub is_fixed: bool,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub introduced_date: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub patched_date: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub fixed_date: String,
}

impl ListReportingIssueResult {
    /// Affected projects regardless of whether the request was grouped.
    pub fn affected_projects(&self) -> Vec<&ReportingIssueProject> {
        if self.projects.is_empty() {
            if self.project == ReportingIssueProject::default() {
                Vec::new()
            } else {
                vec![&self.project]
            }
        } else {
            self.projects.iter().collect()
        }
    }
}

/// A vulnerability finding.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportingIssue {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub url: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub id: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub title: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "type", default)]
    pub issue_type: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub package: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub version: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub severity: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub original_severity: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub unique_severities_list: Vec<String>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub exploit_maturity: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub is_upgradable: bool,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub is_patchable: bool,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub is_pinnable: bool,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub jira_issue_url: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub publication_time: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub disclosure_time: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub language: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub package_manager: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub identifiers: IssueIdentifiers,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub credit: Vec<String>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "CVSSv3", default)]
    pub cvss_v3: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub priority_score: u32,
    /// CVSS base score. Sent either as a number or as a numeric string.
    #[serde_as(deserialize_as = "DefaultOnNull<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    pub cvss_score: f64,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub patches: Vec<IssuePatch>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub is_ignored: bool,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub is_patched: bool,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub semver: IssueSemver,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub ignored: Vec<IssueIgnore>,
}

/// External identifiers of an issue.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueIdentifiers {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "CVE", default)]
    pub cve: Vec<String>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "CWE", default)]
    pub cwe: Vec<String>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "OSVDB", default)]
    pub osvdb: Vec<String>,
}

/// A patch that addresses an issue.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuePatch {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub id: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub modification_time: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub urls: Vec<String>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub comments: Vec<String>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub version: String,
}

/// Affected and unaffected version ranges.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueSemver {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub vulnerable: Vec<String>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub unaffected: String,
}

/// An ignore rule applied to an issue.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueIgnore {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub reason: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub expires: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub source: String,
}

/// A project an issue was found in.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportingIssueProject {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub url: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub id: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub name: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub source: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub package_manager: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub target_file: String,
}

/// Sort field for reporting queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IssueSortBy {
    Severity,
    IssueTitle,
    ProjectName,
    IsFixed,
    IsPatched,
    IsIgnored,
    IntroducedDate,
    IsUpgradable,
    IsPatchable,
    PriorityScore,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Grouping for reporting queries. The API only supports grouping by issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueGroupBy {
    Issue,
}

/// Query parameters for [`ReportingService::list_latest_issues`].
///
/// Every field is optional; unset (or zero) fields are not sent and the
/// server default applies.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListReportingIssuesRequest {
    /// Page number (1-indexed).
    #[serde(skip_serializing_if = "super::unset")]
    pub page: Option<u32>,

    /// Results per page (the server caps this at 1000).
    #[serde(skip_serializing_if = "super::unset")]
    pub per_page: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_by: Option<IssueGroupBy>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<IssueSortBy>,
}

#[derive(Debug, Serialize)]
struct IssuesFilterBody<'a> {
    filters: IssuesFilters<'a>,
}

#[derive(Debug, Serialize)]
struct IssuesFilters<'a> {
    orgs: [&'a str; 1],
}

/// Reporting endpoints.
///
/// Obtained from [`SnykClient::reporting`].
#[derive(Debug, Clone, Copy)]
pub struct ReportingService<'a> {
    client: &'a SnykClient,
}

impl<'a> ReportingService<'a> {
    pub(crate) fn new(client: &'a SnykClient) -> Self {
        Self { client }
    }

    /// List the latest issues of an organization.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use snykapi::{IssueGroupBy, ListReportingIssuesRequest, SnykClient};
    ///
    /// # async fn example() -> snykapi::Result<()> {
    /// let client = SnykClient::from_env()?;
    /// let request = ListReportingIssuesRequest {
    ///     per_page: Some(100),
    ///     group_by: Some(IssueGroupBy::Issue),
    ///     ..Default::default()
    /// };
    /// let (issues, _) = client.reporting().list_latest_issues("org-id", &request).await?;
    /// println!("{} of {} issues", issues.results.len(), issues.total);
    /// # Ok(())
    /// # }
    /// ```
    #[tracing::instrument(skip(self))]
    pub async fn list_latest_issues(
        &self,
        organization_id: &str,
        request: &ListReportingIssuesRequest,
    ) -> Result<(ListReportingIssuesResponse, ResponseInfo)> {
        let path = format!("{REPORTING_BASE_PATH}/issues/latest");
        let body = IssuesFilterBody {
            filters: IssuesFilters {
                orgs: [organization_id],
            },
        };

        let response = self.client.post_with_query(&path, request, &body).await?;
        SnykClient::decode(response).await
    }
}
