//! Organization models and the organizations service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnError, DefaultOnNull};

use super::path_segment;
use crate::client::SnykClient;
use crate::error::{Precondition, Result};
use crate::response::ResponseInfo;

const ORG_BASE_PATH: &str = "org";

/// A Snyk organization.
///
/// Organizations are the billing and management units that own projects
/// and members. Missing or `null` string fields decode to empty strings.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    /// Organization ID (UUID).
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub id: String,

    /// Display name.
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub name: String,

    /// URL-friendly slug.
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub slug: String,

    /// API URL of the organization.
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub url: String,

    /// The group this organization belongs to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<OrganizationGroup>,
}

/// Group reference embedded in an [`Organization`].
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationGroup {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub id: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub name: String,
}

/// Payload for creating an organization.
///
/// Without a `group_id` the server creates a personal organization that does
/// not belong to any group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationCreateRequest {
    /// Name of the new organization.
    pub name: String,

    /// Group to create the organization in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,

    /// Organization to copy settings from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_org_id: Option<String>,
}

impl OrganizationCreateRequest {
    /// Create a request for a personal organization with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Create the organization inside a group.
    #[must_use]
    pub fn in_group(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    /// Copy settings from an existing organization.
    #[must_use]
    pub fn copy_from(mut self, source_org_id: impl Into<String>) -> Self {
        self.source_org_id = Some(source_org_id.into());
        self
    }
}

/// A member of an organization, with their role in it.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationMember {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub id: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub name: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub username: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub email: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub role: String,
}

/// An invited user who has not accepted yet.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingProvision {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub email: String,

    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub role: String,

    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub role_public_id: String,

    /// When the invitation was created. `None` when absent or unparsable.
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
}

/// Paging for [`OrgsService::list_pending_user_provisions`].
///
/// Unset or zero values are left out of the query so the server default
/// applies.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPendingUserProvisionsOptions {
    /// Number of items per page.
    #[serde(skip_serializing_if = "super::unset")]
    pub per_page: Option<u32>,

    /// Page number (1-indexed).
    #[serde(skip_serializing_if = "super::unset")]
    pub page: Option<u32>,
}

impl ListPendingUserProvisionsOptions {
    /// Options for a specific page.
    #[must_use]
    pub fn for_page(page: u32, per_page: u32) -> Self {
        Self {
            per_page: Some(per_page),
            page: Some(page),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MembersQuery {
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    include_group_admins: bool,
}

/// API response wrapper for listing organizations.
#[serde_as]
#[derive(Debug, Deserialize)]
struct OrganizationsRoot {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    orgs: Vec<Organization>,
}

/// Organization endpoints.
///
/// Obtained from [`SnykClient::orgs`].
#[derive(Debug, Clone, Copy)]
pub struct OrgsService<'a> {
    client: &'a SnykClient,
}

impl<'a> OrgsService<'a> {
    pub(crate) fn new(client: &'a SnykClient) -> Self {
        Self { client }
    }

    /// List all organizations the caller belongs to.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<(Vec<Organization>, ResponseInfo)> {
        let response = self.client.get("orgs").await?;
        let (root, info): (OrganizationsRoot, _) = SnykClient::decode(response).await?;
        Ok((root.orgs, info))
    }

    /// Create an organization.
    ///
    /// # Errors
    ///
    /// Returns [`Precondition::EmptyPayload`] without sending anything when
    /// `request` is `None`.
    #[tracing::instrument(skip(self))]
    pub async fn create(
        &self,
        request: Option<&OrganizationCreateRequest>,
    ) -> Result<(Organization, ResponseInfo)> {
        let request = request.ok_or(Precondition::EmptyPayload)?;

        let response = self.client.post(ORG_BASE_PATH, request).await?;
        SnykClient::decode(response).await
    }

    /// Delete the organization with the given ID.
    ///
    /// # Errors
    ///
    /// Returns [`Precondition::EmptyArgument`] without sending anything when
    /// `organization_id` is empty, and [`Precondition::InvalidArgument`] when
    /// it is `.` or `..`.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, organization_id: &str) -> Result<ResponseInfo> {
        if organization_id.is_empty() {
            return Err(Precondition::EmptyArgument.into());
        }

        let path = format!("{}/{}", ORG_BASE_PATH, path_segment(organization_id)?);
        let response = self.client.delete(&path).await?;
        Ok(ResponseInfo::from(&response))
    }

    /// List the members of an organization.
    ///
    /// Group administrators are only included when `include_group_admins`
    /// is set.
    #[tracing::instrument(skip(self))]
    pub async fn list_members(
        &self,
        organization_id: &str,
        include_group_admins: bool,
    ) -> Result<(Vec<OrganizationMember>, ResponseInfo)> {
        let path = format!(
            "{}/{}/members",
            ORG_BASE_PATH,
            path_segment(organization_id)?
        );
        let query = MembersQuery {
            include_group_admins,
        };

        let response = self.client.get_with_query(&path, &query).await?;
        SnykClient::decode(response).await
    }

    /// List invitations that have not been accepted yet.
    #[tracing::instrument(skip(self))]
    pub async fn list_pending_user_provisions(
        &self,
        organization_id: &str,
        options: &ListPendingUserProvisionsOptions,
    ) -> Result<(Vec<PendingProvision>, ResponseInfo)> {
        let path = format!(
            "{}/{}/provision",
            ORG_BASE_PATH,
            path_segment(organization_id)?
        );

        let response = self.client.get_with_query(&path, options).await?;
        SnykClient::decode(response).await
    }
}
