//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use std::collections::BTreeMap;

use chrono::{TimeZone, Utc};

use crate::{
    GroupMember, GroupMemberOrg, IssueIdentifiers, ListReportingIssueResult, Organization,
    OrganizationGroup, OrganizationMember, PendingProvision, Project, ReportingIssue,
    ReportingIssueProject, Tag,
};

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    // =========================================================================
    // Organization Fixtures
    // =========================================================================

    /// Create an organization that does not belong to a group.
    pub fn organization(id: &str, name: &str) -> Organization {
        let slug = name.to_ascii_lowercase().replace(' ', "-");
        Organization {
            id: id.to_string(),
            name: name.to_string(),
            url: format!("https://snyk.mock/api/org/{slug}"),
            slug,
            group: None,
        }
    }

    /// Create an organization inside a group.
    pub fn group_organization(id: &str, name: &str, group_id: &str, group_name: &str) -> Organization {
        let mut org = Self::organization(id, name);
        org.group = Some(OrganizationGroup {
            id: group_id.to_string(),
            name: group_name.to_string(),
        });
        org
    }

    /// Create an organization member whose name fields derive from `id`.
    pub fn org_member(id: &str, role: &str) -> OrganizationMember {
        OrganizationMember {
            id: id.to_string(),
            name: format!("User {id}"),
            username: id.to_string(),
            email: format!("{id}@example.com"),
            role: role.to_string(),
        }
    }

    /// Create a pending invitation.
    pub fn provision(email: &str, role: &str) -> PendingProvision {
        PendingProvision {
            email: email.to_string(),
            role: role.to_string(),
            role_public_id: format!("role-{role}"),
            created: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).single(),
        }
    }

    /// Create a group member with roles in the given organizations.
    pub fn group_member(id: &str, group_role: &str, orgs: &[(&str, &str)]) -> GroupMember {
        GroupMember {
            id: id.to_string(),
            name: format!("User {id}"),
            username: id.to_string(),
            email: format!("{id}@example.com"),
            orgs: orgs
                .iter()
                .map(|(name, role)| GroupMemberOrg {
                    name: name.to_string(),
                    role: role.to_string(),
                })
                .collect(),
            group_role: group_role.to_string(),
        }
    }

    // =========================================================================
    // Project Fixtures
    // =========================================================================

    /// Create a project with issue counts `[low, medium, high, critical]`.
    pub fn project(id: &str, name: &str, counts: [u64; 4]) -> Project {
        let issue_counts_by_severity: BTreeMap<String, u64> = ["low", "medium", "high", "critical"]
            .iter()
            .zip(counts)
            .map(|(severity, count)| (severity.to_string(), count))
            .collect();

        Project {
            id: id.to_string(),
            name: name.to_string(),
            origin: "github".to_string(),
            issue_counts_by_severity,
            tags: vec![Tag {
                key: "team".to_string(),
                value: "platform".to_string(),
            }],
        }
    }

    // =========================================================================
    // Reporting Fixtures
    // =========================================================================

    /// Create an ungrouped issue result for one project.
    pub fn issue_result(issue_id: &str, severity: &str, project_id: &str) -> ListReportingIssueResult {
        ListReportingIssueResult {
            issue: ReportingIssue {
                url: format!("https://snyk.io/vuln/{issue_id}"),
                id: issue_id.to_string(),
                title: format!("Vulnerability {issue_id}"),
                issue_type: "vuln".to_string(),
                package: "lodash".to_string(),
                version: "4.17.15".to_string(),
                severity: severity.to_string(),
                original_severity: severity.to_string(),
                unique_severities_list: vec![severity.to_string()],
                package_manager: "npm".to_string(),
                identifiers: IssueIdentifiers {
                    cve: vec![format!("CVE-{issue_id}")],
                    ..Default::default()
                },
                ..Default::default()
            },
            project: ReportingIssueProject {
                id: project_id.to_string(),
                name: format!("acme/{project_id}"),
                source: "github".to_string(),
                package_manager: "npm".to_string(),
                target_file: "package.json".to_string(),
                ..Default::default()
            },
            introduced_date: "2024-01-15".to_string(),
            ..Default::default()
        }
    }

    // =========================================================================
    // Scenario Builders
    // =========================================================================

    /// Create a default set of test data for common scenarios.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario::new()
    }
}

/// A complete test scenario with related entities.
///
/// Contains one group (`group-1`) with one organization (`org-acme`), plus a
/// personal organization (`org-personal`).
pub struct DefaultScenario {
    pub groups: Vec<(String, String)>,
    pub orgs: Vec<Organization>,
    pub members: Vec<(String, OrganizationMember)>,
    pub group_admins: Vec<(String, OrganizationMember)>,
    pub provisions: Vec<(String, PendingProvision)>,
    pub group_members: Vec<(String, GroupMember)>,
    pub projects: Vec<(String, Project)>,
    pub issues: Vec<(String, ListReportingIssueResult)>,
}

impl DefaultScenario {
    fn new() -> Self {
        let acme = "org-acme".to_string();

        let orgs = vec![
            Fixtures::group_organization("org-acme", "Acme", "group-1", "Acme Group"),
            Fixtures::organization("org-personal", "Personal"),
        ];

        let members = vec![
            (acme.clone(), Fixtures::org_member("alice", "admin")),
            (acme.clone(), Fixtures::org_member("bob", "collaborator")),
        ];

        let group_admins = vec![(acme.clone(), Fixtures::org_member("grace", "admin"))];

        let provisions = vec![
            (acme.clone(), Fixtures::provision("new1@example.com", "collaborator")),
            (acme.clone(), Fixtures::provision("new2@example.com", "collaborator")),
            (acme.clone(), Fixtures::provision("new3@example.com", "admin")),
        ];

        let group_members = vec![
            (
                "group-1".to_string(),
                Fixtures::group_member("grace", "admin", &[]),
            ),
            (
                "group-1".to_string(),
                Fixtures::group_member("alice", "viewer", &[("Acme", "admin")]),
            ),
        ];

        let projects = vec![
            (acme.clone(), Fixtures::project("proj-web", "acme/web", [8, 15, 10, 3])),
            (acme.clone(), Fixtures::project("proj-api", "acme/api", [1, 0, 2, 0])),
        ];

        let issues = vec![
            (acme.clone(), Fixtures::issue_result("SNYK-JS-LODASH-1", "high", "proj-web")),
            (acme.clone(), Fixtures::issue_result("SNYK-JS-LODASH-1", "high", "proj-api")),
            (acme, Fixtures::issue_result("SNYK-JS-MINIMIST-2", "critical", "proj-web")),
        ];

        Self {
            groups: vec![("group-1".to_string(), "Acme Group".to_string())],
            orgs,
            members,
            group_admins,
            provisions,
            group_members,
            projects,
            issues,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_organization_fixture() {
        let org = Fixtures::organization("org-1", "My Org");
        assert_eq!(org.slug, "my-org");
        assert!(org.url.ends_with("/my-org"));
        assert!(org.group.is_none());
    }

    #[test]
    fn test_project_fixture_counts() {
        let project = Fixtures::project("p1", "acme/p1", [1, 2, 3, 4]);
        assert_eq!(project.issue_count("low"), 1);
        assert_eq!(project.issue_count("critical"), 4);
        assert_eq!(project.total_issues(), 10);
    }

    #[test]
    fn test_issue_result_fixture() {
        let result = Fixtures::issue_result("SNYK-1", "medium", "p1");
        assert_eq!(result.issue.id, "SNYK-1");
        assert_eq!(result.issue.severity, "medium");
        assert_eq!(result.project.id, "p1");
        assert!(result.projects.is_empty());
    }

    #[test]
    fn test_default_scenario() {
        let scenario = Fixtures::default_scenario();
        assert_eq!(scenario.orgs.len(), 2);
        assert!(!scenario.members.is_empty());
        assert!(!scenario.projects.is_empty());
        assert!(!scenario.issues.is_empty());
    }
}
