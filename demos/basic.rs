//! Basic example demonstrating the Snyk API client.
//!
//! Run with:
//! ```
//! SNYK_TOKEN=your-token cargo run --example basic
//! ```

use snykapi::{
    IssueGroupBy, IssueSortBy, ListReportingIssuesRequest, SnykClient, SortOrder,
};

#[tokio::main]
async fn main() -> snykapi::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create client from environment variables
    println!("Creating Snyk client...");
    let client = SnykClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    println!("\n--- Listing Organizations ---");
    let (orgs, response) = client.orgs().list().await?;
    println!("Found {} organizations ({})", orgs.len(), response.status);
    for org in &orgs {
        let group = org.group.as_ref().map(|g| g.name.as_str()).unwrap_or("-");
        println!("  - {} [{}] group: {}", org.name, org.id, group);
    }

    let Some(org) = orgs.first() else {
        println!("\nNo organizations visible to this token");
        return Ok(());
    };

    println!("\n--- Members of {} ---", org.name);
    let (members, _) = client.orgs().list_members(&org.id, true).await?;
    for member in &members {
        println!("  - {} <{}> ({})", member.username, member.email, member.role);
    }

    if let Some(group) = &org.group {
        println!("\n--- Members of group {} ---", group.name);
        let (group_members, _) = client.groups().list_members(&group.id).await?;
        for member in &group_members {
            println!(
                "  - {} ({}) in {} orgs",
                member.username,
                member.group_role,
                member.orgs.len()
            );
        }
    }

    println!("\n--- Projects of {} ---", org.name);
    let (projects, _) = client.projects().list(&org.id).await?;
    for project in &projects {
        println!(
            "  - {} ({}) critical: {} high: {} total: {}",
            project.name,
            project.origin,
            project.issue_count("critical"),
            project.issue_count("high"),
            project.total_issues()
        );
    }

    println!("\n--- Latest Issues (most severe first) ---");
    let request = ListReportingIssuesRequest {
        per_page: Some(10),
        group_by: Some(IssueGroupBy::Issue),
        sort_by: Some(IssueSortBy::Severity),
        order: Some(SortOrder::Desc),
        ..Default::default()
    };
    let (issues, _) = client.reporting().list_latest_issues(&org.id, &request).await?;
    println!("Showing {} of {} issues", issues.results.len(), issues.total);
    for result in &issues.results {
        println!(
            "  - [{}] {} in {}@{} ({} projects)",
            result.issue.severity,
            result.issue.title,
            result.issue.package,
            result.issue.version,
            result.affected_projects().len()
        );
    }

    println!("\nDone!");
    Ok(())
}
