//! Mock Snyk API server.
//!
//! Provides an axum-based HTTP server that simulates the Snyk API.

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers;
use super::state::MockState;

/// A mock Snyk API server for testing.
///
/// The server runs in the background and can be used to test the Snyk client
/// against a realistic API implementation.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `url()` to get the server's base URL.
    pub async fn start() -> Self {
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with empty state.
    ///
    /// Useful when you want to control exactly what data is available.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            url: format!("http://{}", addr),
            handle,
            state: shared_state,
        }
    }

    /// Get the base URL of the mock server.
    ///
    /// Use this URL when creating a `SnykClient` for testing.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    ///
    /// This allows modifying the mock data during a test.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Shutdown the server.
    ///
    /// This aborts the server task. It's safe to call multiple times.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// Create the default state with common test fixtures.
    fn default_state() -> MockState {
        let scenario = Fixtures::default_scenario();
        Self::state_from_scenario(scenario)
    }

    /// Create state from a scenario.
    fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        let mut state = MockState::new();

        state.groups.extend(scenario.groups);
        state.orgs = scenario.orgs;

        for (org_id, member) in scenario.members {
            state.org_members.entry(org_id).or_default().push(member);
        }

        for (org_id, admin) in scenario.group_admins {
            state.group_admins.entry(org_id).or_default().push(admin);
        }

        for (org_id, provision) in scenario.provisions {
            state.provisions.entry(org_id).or_default().push(provision);
        }

        for (group_id, member) in scenario.group_members {
            state.group_members.entry(group_id).or_default().push(member);
        }

        for (org_id, project) in scenario.projects {
            state.projects.entry(org_id).or_default().push(project);
        }

        for (org_id, result) in scenario.issues {
            state.issues.entry(org_id).or_default().push(result);
        }

        state
    }

    /// Create the axum router with all routes.
    fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        Router::new()
            // Organization routes
            .route("/orgs", get(handlers::list_orgs))
            .route("/org", post(handlers::create_org))
            .route("/org/:id", delete(handlers::delete_org))
            .route("/org/:id/members", get(handlers::list_org_members))
            .route("/org/:id/provision", get(handlers::list_provisions))
            // Project routes
            .route("/org/:id/projects", post(handlers::list_projects))
            // Group routes
            .route("/group/:id/members", get(handlers::list_group_members))
            // Reporting routes
            .route(
                "/v1/reporting/issues/latest",
                post(handlers::list_latest_issues),
            )
            // Health check
            .route("/health", get(health_check))
            .with_state(state)
    }
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}
