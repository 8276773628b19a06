//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Snyk API server.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    GroupMember, IssueGroupBy, IssueSortBy, ListReportingIssueResult, ListReportingIssuesRequest,
    Organization, OrganizationCreateRequest, OrganizationGroup, OrganizationMember,
    PendingProvision, Project, SortOrder,
};

/// Base URL used for the `url` field of organizations created by the mock.
const MOCK_ORG_URL: &str = "https://snyk.mock/api/org";

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    /// Organizations in listing order.
    pub orgs: Vec<Organization>,

    /// Group names indexed by group ID.
    pub groups: HashMap<String, String>,

    /// Direct members indexed by organization ID.
    pub org_members: HashMap<String, Vec<OrganizationMember>>,

    /// Group administrators indexed by organization ID. Only returned when
    /// `includeGroupAdmins=true` is requested.
    pub group_admins: HashMap<String, Vec<OrganizationMember>>,

    /// Pending invitations indexed by organization ID.
    pub provisions: HashMap<String, Vec<PendingProvision>>,

    /// Group members indexed by group ID.
    pub group_members: HashMap<String, Vec<GroupMember>>,

    /// Projects indexed by organization ID.
    pub projects: HashMap<String, Vec<Project>>,

    /// Ungrouped issue results (one per issue and project) indexed by
    /// organization ID.
    pub issues: HashMap<String, Vec<ListReportingIssueResult>>,

    /// Optional authentication token. If set, requests must include this token.
    pub required_token: Option<String>,

    /// Counter for IDs of created organizations.
    next_org_id: u64,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add a group.
    pub fn with_group(mut self, id: &str, name: &str) -> Self {
        self.groups.insert(id.to_string(), name.to_string());
        self
    }

    /// Add an organization.
    pub fn with_org(mut self, org: Organization) -> Self {
        self.orgs.push(org);
        self
    }

    /// Add a direct member to an organization.
    pub fn with_member(mut self, org_id: &str, member: OrganizationMember) -> Self {
        self.org_members
            .entry(org_id.to_string())
            .or_default()
            .push(member);
        self
    }

    /// Add a group administrator visible from an organization.
    pub fn with_group_admin(mut self, org_id: &str, member: OrganizationMember) -> Self {
        self.group_admins
            .entry(org_id.to_string())
            .or_default()
            .push(member);
        self
    }

    /// Add a pending invitation to an organization.
    pub fn with_provision(mut self, org_id: &str, provision: PendingProvision) -> Self {
        self.provisions
            .entry(org_id.to_string())
            .or_default()
            .push(provision);
        self
    }

    /// Add a member to a group.
    pub fn with_group_member(mut self, group_id: &str, member: GroupMember) -> Self {
        self.group_members
            .entry(group_id.to_string())
            .or_default()
            .push(member);
        self
    }

    /// Add a project to an organization.
    pub fn with_project(mut self, org_id: &str, project: Project) -> Self {
        self.projects
            .entry(org_id.to_string())
            .or_default()
            .push(project);
        self
    }

    /// Add an issue result (with its single `project`) to an organization.
    pub fn with_issue(mut self, org_id: &str, result: ListReportingIssueResult) -> Self {
        self.issues
            .entry(org_id.to_string())
            .or_default()
            .push(result);
        self
    }

    /// Set the required authentication token.
    pub fn with_required_token(mut self, token: &str) -> Self {
        self.required_token = Some(token.to_string());
        self
    }

    /// Check an `Authorization` header value against the required token.
    pub fn is_authorized(&self, authorization: Option<&str>) -> bool {
        match &self.required_token {
            Some(token) => authorization == Some(format!("token {token}").as_str()),
            None => true,
        }
    }

    /// Get an organization by ID.
    pub fn get_org(&self, id: &str) -> Option<&Organization> {
        self.orgs.iter().find(|o| o.id == id)
    }

    /// Create an organization and return it.
    ///
    /// Returns `None` when the request names a group that does not exist.
    pub fn create_org(&mut self, request: &OrganizationCreateRequest) -> Option<Organization> {
        let group = match &request.group_id {
            Some(group_id) => Some(OrganizationGroup {
                id: group_id.clone(),
                name: self.groups.get(group_id)?.clone(),
            }),
            None => None,
        };

        self.next_org_id += 1;
        let slug = slugify(&request.name);
        let org = Organization {
            id: format!("mock-org-{}", self.next_org_id),
            name: request.name.clone(),
            url: format!("{MOCK_ORG_URL}/{slug}"),
            slug,
            group,
        };

        // Copying settings is modelled as copying the member list.
        if let Some(source) = &request.source_org_id {
            if let Some(members) = self.org_members.get(source).cloned() {
                self.org_members.insert(org.id.clone(), members);
            }
        }

        self.orgs.push(org.clone());
        Some(org)
    }

    /// Delete an organization and everything it owns.
    ///
    /// Returns `false` if the organization does not exist.
    pub fn delete_org(&mut self, id: &str) -> bool {
        let before = self.orgs.len();
        self.orgs.retain(|o| o.id != id);
        if self.orgs.len() == before {
            return false;
        }

        self.org_members.remove(id);
        self.group_admins.remove(id);
        self.provisions.remove(id);
        self.projects.remove(id);
        self.issues.remove(id);
        true
    }

    /// List members of an organization, optionally with group administrators.
    pub fn list_members(&self, org_id: &str, include_group_admins: bool) -> Vec<OrganizationMember> {
        let mut members = self.org_members.get(org_id).cloned().unwrap_or_default();
        if include_group_admins {
            members.extend(self.group_admins.get(org_id).cloned().unwrap_or_default());
        }
        members
    }

    /// List one page of pending invitations. Without a page size everything
    /// from `page` onwards is returned.
    pub fn list_provisions(
        &self,
        org_id: &str,
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> Vec<PendingProvision> {
        let all = self.provisions.get(org_id).map(Vec::as_slice).unwrap_or(&[]);
        paginate(all, page, per_page)
    }

    /// List the projects of an organization.
    pub fn list_projects(&self, org_id: &str) -> Vec<Project> {
        self.projects.get(org_id).cloned().unwrap_or_default()
    }

    /// Query issues across organizations.
    ///
    /// Returns the requested page and the total number of results before
    /// paging.
    pub fn query_issues(
        &self,
        org_ids: &[String],
        request: &ListReportingIssuesRequest,
    ) -> (Vec<ListReportingIssueResult>, u64) {
        let flat = org_ids
            .iter()
            .filter_map(|id| self.issues.get(id))
            .flatten()
            .cloned();

        let mut results: Vec<ListReportingIssueResult> = match request.group_by {
            Some(IssueGroupBy::Issue) => group_by_issue(flat),
            None => flat.collect(),
        };

        if let Some(sort_by) = request.sort_by {
            let descending = request.order == Some(SortOrder::Desc);
            results.sort_by(|a, b| {
                let ordering = compare(sort_by, a, b);
                if descending {
                    ordering.reverse()
                } else {
                    ordering
                }
            });
        }

        let total = results.len() as u64;
        (paginate(&results, request.page, request.per_page), total)
    }
}

/// Merge per-project results of the same issue into one result listing all
/// affected projects.
fn group_by_issue(
    results: impl Iterator<Item = ListReportingIssueResult>,
) -> Vec<ListReportingIssueResult> {
    let mut grouped: Vec<ListReportingIssueResult> = Vec::new();

    for result in results {
        match grouped.iter_mut().find(|g| g.issue.id == result.issue.id) {
            Some(existing) => existing.projects.push(result.project),
            None => {
                let mut first = result.clone();
                first.projects = vec![result.project];
                first.project = Default::default();
                grouped.push(first);
            }
        }
    }

    grouped
}

fn compare(
    sort_by: IssueSortBy,
    a: &ListReportingIssueResult,
    b: &ListReportingIssueResult,
) -> std::cmp::Ordering {
    match sort_by {
        IssueSortBy::Severity => severity_rank(&a.issue.severity).cmp(&severity_rank(&b.issue.severity)),
        IssueSortBy::IssueTitle => a.issue.title.cmp(&b.issue.title),
        IssueSortBy::ProjectName => a.project.name.cmp(&b.project.name),
        IssueSortBy::IsFixed => a.is_fixed.cmp(&b.is_fixed),
        IssueSortBy::IsPatched => a.issue.is_patched.cmp(&b.issue.is_patched),
        IssueSortBy::IsIgnored => a.issue.is_ignored.cmp(&b.issue.is_ignored),
        IssueSortBy::IntroducedDate => a.introduced_date.cmp(&b.introduced_date),
        IssueSortBy::IsUpgradable => a.issue.is_upgradable.cmp(&b.issue.is_upgradable),
        IssueSortBy::IsPatchable => a.issue.is_patchable.cmp(&b.issue.is_patchable),
        IssueSortBy::PriorityScore => a.issue.priority_score.cmp(&b.issue.priority_score),
    }
}

fn severity_rank(severity: &str) -> u8 {
    match severity {
        "low" => 1,
        "medium" => 2,
        "high" => 3,
        "critical" => 4,
        _ => 0,
    }
}

/// Page numbers start at 1; zero or missing values mean "not set".
fn paginate<T: Clone>(items: &[T], page: Option<u32>, per_page: Option<u32>) -> Vec<T> {
    let page = page.filter(|p| *p > 0).unwrap_or(1) as usize;
    match per_page.filter(|n| *n > 0) {
        Some(per_page) => {
            let per_page = per_page as usize;
            items
                .iter()
                .skip((page - 1) * per_page)
                .take(per_page)
                .cloned()
                .collect()
        }
        None => items.to_vec(),
    }
}

fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}
