//! Project model and the projects service.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};

use super::path_segment;
use crate::client::SnykClient;
use crate::error::{Precondition, Result};
use crate::response::ResponseInfo;

/// A Snyk project.
///
/// Projects are the scanned codebases or artifacts inside an organization,
/// each carrying its open issue counts per severity.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Project ID (UUID).
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub id: String,

    /// Project name, usually `owner/repo` or `owner/repo:manifest`.
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub name: String,

    /// Integration the project was imported from (e.g., "github", "cli").
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub origin: String,

    /// Open issue counts keyed by severity ("low", "medium", "high", "critical").
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub issue_counts_by_severity: BTreeMap<String, u64>,

    /// Project tags.
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Project {
    /// Issue count for one severity, zero when the server did not report it.
    pub fn issue_count(&self, severity: &str) -> u64 {
        self.issue_counts_by_severity
            .get(severity)
            .copied()
            .unwrap_or(0)
    }

    /// Sum of issue counts across all severities.
    pub fn total_issues(&self) -> u64 {
        self.issue_counts_by_severity.values().sum()
    }

    /// Value of the first tag with the given key.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|t| t.key == key)
            .map(|t| t.value.as_str())
    }
}

/// A key/value tag attached to a project.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub key: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub value: String,
}

/// Organization summary in the project listing envelope. The listing returns
/// projects alone, so this stays internal.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct ProjectsOrg {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub id: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub name: String,
}

/// API response wrapper for listing projects.
#[serde_as]
#[derive(Debug, Deserialize)]
struct ProjectsRoot {
    #[serde(default)]
    #[allow(dead_code)] // Decoded for completeness, only `projects` is returned
    org: Option<ProjectsOrg>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    projects: Vec<Project>,
}

/// Filter body for the project listing. The endpoint requires a body even
/// when nothing is filtered.
#[derive(Debug, Default, Serialize)]
struct ProjectsFilter {}

/// Project endpoints.
///
/// Obtained from [`SnykClient::projects`].
#[derive(Debug, Clone, Copy)]
pub struct ProjectsService<'a> {
    client: &'a SnykClient,
}

impl<'a> ProjectsService<'a> {
    pub(crate) fn new(client: &'a SnykClient) -> Self {
        Self { client }
    }

    /// List all projects of an organization.
    ///
    /// # Errors
    ///
    /// Returns [`Precondition::EmptyArgument`] without sending anything when
    /// `organization_id` is empty.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self, organization_id: &str) -> Result<(Vec<Project>, ResponseInfo)> {
        if organization_id.is_empty() {
            return Err(Precondition::EmptyArgument.into());
        }

        let path = format!("org/{}/projects", path_segment(organization_id)?);

        let response = self.client.post(&path, &ProjectsFilter::default()).await?;
        let (root, info): (ProjectsRoot, _) = SnykClient::decode(response).await?;
        Ok((root.projects, info))
    }
}
