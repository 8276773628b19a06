//! Organization endpoint tests.
//!
//! Uses wiremock to mock the Snyk API and check the exact request sent.

use chrono::{TimeZone, Utc};
use snykapi::{
    ListPendingUserProvisionsOptions, Organization, OrganizationCreateRequest,
    OrganizationMember, PendingProvision, Precondition, SnykClient,
};
use wiremock::matchers::{any, body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_list_orgs_unwraps_envelope() {
    let mock_server = MockServer::start().await;

    let response = serde_json::json!({
        "orgs": [
            {
                "id": "long-uuid-first",
                "name": "Test Org First"
            },
            {
                "id": "long-uuid-second",
                "slug": "test-org-second",
                "url": "https://testing.snyk.io/api/org/test-org-second",
                "group": null
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/orgs"))
        .and(header("authorization", "token test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&response))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = SnykClient::new("test-token", &mock_server.uri()).unwrap();
    let (orgs, info) = client.orgs().list().await.unwrap();

    assert_eq!(info.status.as_u16(), 200);
    assert_eq!(
        orgs,
        vec![
            Organization {
                id: "long-uuid-first".to_string(),
                name: "Test Org First".to_string(),
                ..Default::default()
            },
            Organization {
                id: "long-uuid-second".to_string(),
                slug: "test-org-second".to_string(),
                url: "https://testing.snyk.io/api/org/test-org-second".to_string(),
                ..Default::default()
            },
        ]
    );
}

#[tokio::test]
async fn test_create_org_posts_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/org"))
        .and(body_json(serde_json::json!({"name": "Test Org"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": "long-uuid",
            "name": "Test Org",
            "slug": "test-org",
            "url": "https://testing.snyk.io/api/org/test-org",
            "group": null
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = SnykClient::new("test-token", &mock_server.uri()).unwrap();
    let request = OrganizationCreateRequest::new("Test Org");
    let (org, info) = client.orgs().create(Some(&request)).await.unwrap();

    assert_eq!(info.status.as_u16(), 201);
    assert_eq!(
        org,
        Organization {
            id: "long-uuid".to_string(),
            name: "Test Org".to_string(),
            slug: "test-org".to_string(),
            url: "https://testing.snyk.io/api/org/test-org".to_string(),
            group: None,
        }
    );
}

#[tokio::test]
async fn test_create_org_in_group_sends_optional_ids() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/org"))
        .and(body_json(serde_json::json!({
            "name": "Child Org",
            "groupId": "group-1",
            "sourceOrgId": "template-org"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": "child-uuid",
            "name": "Child Org",
            "group": {"id": "group-1", "name": "Group One"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = SnykClient::new("test-token", &mock_server.uri()).unwrap();
    let request = OrganizationCreateRequest::new("Child Org")
        .in_group("group-1")
        .copy_from("template-org");
    let (org, _) = client.orgs().create(Some(&request)).await.unwrap();

    let group = org.group.expect("group should be set");
    assert_eq!(group.id, "group-1");
    assert_eq!(group.name, "Group One");
}

#[tokio::test]
async fn test_create_org_without_payload_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = SnykClient::new("test-token", &mock_server.uri()).unwrap();
    let err = client.orgs().create(None).await.unwrap_err();

    assert_eq!(err.precondition(), Some(Precondition::EmptyPayload));
    assert!(err.response().is_none());
}

#[tokio::test]
async fn test_delete_org() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/org/long-uuid"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = SnykClient::new("test-token", &mock_server.uri()).unwrap();
    let info = client.orgs().delete("long-uuid").await.unwrap();

    assert_eq!(info.status.as_u16(), 204);
}

#[tokio::test]
async fn test_delete_org_empty_id_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = SnykClient::new("test-token", &mock_server.uri()).unwrap();
    let err = client.orgs().delete("").await.unwrap_err();

    assert_eq!(err.precondition(), Some(Precondition::EmptyArgument));
}

#[tokio::test]
async fn test_dot_segment_ids_send_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = SnykClient::new("test-token", &format!("{}/api", mock_server.uri())).unwrap();

    let err = client.orgs().delete("..").await.unwrap_err();
    assert_eq!(err.precondition(), Some(Precondition::InvalidArgument));

    let err = client.orgs().list_members("..", false).await.unwrap_err();
    assert_eq!(err.precondition(), Some(Precondition::InvalidArgument));

    let err = client
        .orgs()
        .list_pending_user_provisions(".", &Default::default())
        .await
        .unwrap_err();
    assert_eq!(err.precondition(), Some(Precondition::InvalidArgument));

    let err = client.groups().list_members("..").await.unwrap_err();
    assert_eq!(err.precondition(), Some(Precondition::InvalidArgument));

    let err = client.projects().list(".").await.unwrap_err();
    assert_eq!(err.precondition(), Some(Precondition::InvalidArgument));
}

#[tokio::test]
async fn test_delete_org_with_dots_inside_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/org/team..v2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = SnykClient::new("test-token", &format!("{}/api", mock_server.uri())).unwrap();
    let info = client.orgs().delete("team..v2").await.unwrap();

    assert_eq!(info.status.as_u16(), 204);
}

#[tokio::test]
async fn test_delete_org_not_found_keeps_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/org/missing"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"message": "Org missing was not found"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = SnykClient::new("test-token", &mock_server.uri()).unwrap();
    let err = client.orgs().delete("missing").await.unwrap_err();

    assert_eq!(err.status_code(), Some(404));
    assert!(err.to_string().contains("Org missing was not found"));
}

#[tokio::test]
async fn test_list_members_with_group_admins() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/org/test-org/members"))
        .and(query_param("includeGroupAdmins", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "id": "test-id",
                "name": "test-name",
                "username": "test-username",
                "email": "test-email",
                "role": "test-role"
            }
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = SnykClient::new("test-token", &mock_server.uri()).unwrap();
    let (members, _) = client.orgs().list_members("test-org", true).await.unwrap();

    assert_eq!(
        members,
        vec![OrganizationMember {
            id: "test-id".to_string(),
            name: "test-name".to_string(),
            username: "test-username".to_string(),
            email: "test-email".to_string(),
            role: "test-role".to_string(),
        }]
    );
}

#[tokio::test]
async fn test_list_members_without_group_admins_omits_flag() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/org/test-org/members"))
        .and(query_param_is_missing("includeGroupAdmins"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = SnykClient::new("test-token", &mock_server.uri()).unwrap();
    let (members, _) = client.orgs().list_members("test-org", false).await.unwrap();

    assert!(members.is_empty());
}

#[tokio::test]
async fn test_list_pending_user_provisions() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/org/test-org/provision"))
        .and(query_param_is_missing("page"))
        .and(query_param_is_missing("perPage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "email": "test-email",
                "role": "test-role",
                "rolePublicId": "test-role-public-id",
                "created": "2019-02-04T06:19:00.000Z"
            }
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = SnykClient::new("test-token", &mock_server.uri()).unwrap();
    let (provisions, _) = client
        .orgs()
        .list_pending_user_provisions("test-org", &ListPendingUserProvisionsOptions::default())
        .await
        .unwrap();

    assert_eq!(
        provisions,
        vec![PendingProvision {
            email: "test-email".to_string(),
            role: "test-role".to_string(),
            role_public_id: "test-role-public-id".to_string(),
            created: Some(Utc.with_ymd_and_hms(2019, 2, 4, 6, 19, 0).unwrap()),
        }]
    );
}

#[tokio::test]
async fn test_list_pending_user_provisions_with_paging() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/org/test-org/provision"))
        .and(query_param("page", "2"))
        .and(query_param("perPage", "25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"email": "late@example.com", "role": "collaborator", "created": null}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = SnykClient::new("test-token", &mock_server.uri()).unwrap();
    let options = ListPendingUserProvisionsOptions::for_page(2, 25);
    let (provisions, _) = client
        .orgs()
        .list_pending_user_provisions("test-org", &options)
        .await
        .unwrap();

    assert_eq!(provisions.len(), 1);
    assert!(provisions[0].created.is_none());
    assert_eq!(provisions[0].role_public_id, "");
}
