//! In-memory fake of the Snyk v1 endpoints this crate calls.
//!
//! Requests mutate a shared [`MockState`], so a test can create an
//! organization, see it in `GET orgs` and delete it again. Tokens are only
//! checked when [`MockState::with_required_token`] is set; a wrong token gets
//! a 401 with a Snyk-style `{"code", "message", "error"}` body.
//!
//! [`MockServer::start`] seeds [`DefaultScenario`]:
//!
//! - group `group-1` ("Acme Group") owning `org-acme`, plus a group-less
//!   `org-personal`
//! - `org-acme` members `alice` and `bob`, with `grace` only listed when
//!   group admins are requested, and three pending invitations
//! - projects `proj-web` and `proj-api`, and `SNYK-JS-LODASH-1` found in both
//!   of them next to a critical `SNYK-JS-MINIMIST-2`, so grouping by issue
//!   yields two results out of three
//!
//! ```ignore
//! use snykapi::mock_server::MockServer;
//! use snykapi::{OrganizationCreateRequest, SnykClient};
//!
//! #[tokio::test]
//! async fn create_then_list() {
//!     let server = MockServer::start().await;
//!     let client = SnykClient::new("test-token", server.url()).unwrap();
//!
//!     let request = OrganizationCreateRequest::new("Team").in_group("group-1");
//!     client.orgs().create(Some(&request)).await.unwrap();
//!
//!     let (orgs, _) = client.orgs().list().await.unwrap();
//!     assert_eq!(orgs.len(), 3);
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures};
pub use server::MockServer;
pub use state::MockState;
