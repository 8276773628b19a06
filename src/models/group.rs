//! Group member model and the groups service.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};

use super::path_segment;
use crate::client::SnykClient;
use crate::error::Result;
use crate::response::ResponseInfo;

/// A member of a group.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMember {
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

    /// Organizations in the group this member belongs to.
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub orgs: Vec<GroupMemberOrg>,

    /// Role within the group itself.
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub group_role: String,
}

/// A member's role in one organization of the group.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMemberOrg {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub name: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub role: String,
}

/// Group endpoints.
///
/// Obtained from [`SnykClient::groups`].
#[derive(Debug, Clone, Copy)]
pub struct GroupsService<'a> {
    client: &'a SnykClient,
}

impl<'a> GroupsService<'a> {
    pub(crate) fn new(client: &'a SnykClient) -> Self {
        Self { client }
    }

    /// List all members of a group.
    #[tracing::instrument(skip(self))]
    pub async fn list_members(&self, group_id: &str) -> Result<(Vec<GroupMember>, ResponseInfo)> {
        let path = format!("group/{}/members", path_segment(group_id)?);

        let response = self.client.get(&path).await?;
        SnykClient::decode(response).await
    }
}
