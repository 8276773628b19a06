//! Group endpoint tests.

use snykapi::{GroupMember, GroupMemberOrg, SnykClient};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_list_group_members() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/group/test-group/members"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "id": "test-id",
                "name": "test-name",
                "email": "test-email",
                "username": "test-username",
                "orgs": null,
                "groupRole": "test-role"
            },
            {
                "id": "test-id",
                "name": "test-name",
                "email": "test-email",
                "username": "test-username",
                "orgs": [{"name": "test-org", "role": "test-role"}],
                "groupRole": "test-role"
            }
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = SnykClient::new("test-token", &mock_server.uri()).unwrap();
    let (members, _) = client.groups().list_members("test-group").await.unwrap();

    let base = GroupMember {
        id: "test-id".to_string(),
        name: "test-name".to_string(),
        username: "test-username".to_string(),
        email: "test-email".to_string(),
        orgs: vec![],
        group_role: "test-role".to_string(),
    };
    assert_eq!(
        members,
        vec![
            base.clone(),
            GroupMember {
                orgs: vec![GroupMemberOrg {
                    name: "test-org".to_string(),
                    role: "test-role".to_string(),
                }],
                ..base
            },
        ]
    );
}

#[tokio::test]
async fn test_list_group_members_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/group/test-group/members"))
        .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
            "error": "Forbidden"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = SnykClient::new("test-token", &mock_server.uri()).unwrap();
    let err = client.groups().list_members("test-group").await.unwrap_err();

    assert_eq!(err.status_code(), Some(403));
    assert!(err.to_string().contains("Forbidden"));
}
