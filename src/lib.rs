//! Snyk API client library.
//!
//! A typed Rust client for the Snyk v1 REST API. Operations are grouped into
//! resource services that borrow a shared [`SnykClient`]; each operation
//! sends exactly one request and returns the decoded value together with a
//! [`ResponseInfo`] describing the HTTP response.
//!
//! # Quick Start
//!
//! ```no_run
//! use snykapi::{ListReportingIssuesRequest, OrganizationCreateRequest, SnykClient};
//!
//! #[tokio::main]
//! async fn main() -> snykapi::Result<()> {
//!     // Create client from environment variables
//!     let client = SnykClient::from_env()?;
//!
//!     // List organizations
//!     let (orgs, _) = client.orgs().list().await?;
//!     println!("Found {} organizations", orgs.len());
//!
//!     // Create one inside a group
//!     let request = OrganizationCreateRequest::new("Platform").in_group("group-id");
//!     let (org, response) = client.orgs().create(Some(&request)).await?;
//!     println!("Created {} ({})", org.name, response.status);
//!
//!     // Projects and their latest issues
//!     let (projects, _) = client.projects().list(&org.id).await?;
//!     let (issues, _) = client
//!         .reporting()
//!         .list_latest_issues(&org.id, &ListReportingIssuesRequest::default())
//!         .await?;
//!     println!("{} projects, {} issues", projects.len(), issues.total);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! Calls with an empty required identifier or a missing payload fail with
//! [`SnykError::Precondition`] before anything is sent. All other failures
//! come from the HTTP exchange and keep the [`ResponseInfo`] when a response
//! was received (see [`SnykError::response`]).
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `SNYK_TOKEN` (required) - Your Snyk API token
//! - `SNYK_API_URL` (optional) - Base URL (defaults to `https://snyk.io/api/`)

mod client;
mod error;
mod models;
mod response;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::SnykClient;
pub use error::{Precondition, Result, SnykError};
pub use response::ResponseInfo;

// Re-export models and services
pub use models::{
    // Organization types
    ListPendingUserProvisionsOptions,
    Organization,
    OrganizationCreateRequest,
    OrganizationGroup,
    OrganizationMember,
    OrgsService,
    PendingProvision,
    // Group types
    GroupMember,
    GroupMemberOrg,
    GroupsService,
    // Project types
    Project,
    ProjectsService,
    Tag,
    // Reporting types
    IssueGroupBy,
    IssueIdentifiers,
    IssueIgnore,
    IssuePatch,
    IssueSemver,
    IssueSortBy,
    ListReportingIssueResult,
    ListReportingIssuesRequest,
    ListReportingIssuesResponse,
    ReportingIssue,
    ReportingIssueProject,
    ReportingService,
    SortOrder,
};
