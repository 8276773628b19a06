//! Transport behavior shared by every service: status classification,
//! decode failures and the response descriptor.

use snykapi::{SnykClient, SnykError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_response_info_exposes_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orgs"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-request-id", "req-123")
                .set_body_json(serde_json::json!({"orgs": []})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = SnykClient::new("test-token", &mock_server.uri()).unwrap();
    let (orgs, info) = client.orgs().list().await.unwrap();

    assert!(orgs.is_empty());
    assert_eq!(info.header("x-request-id"), Some("req-123"));
    assert_eq!(info.url.path(), "/orgs");
}

#[tokio::test]
async fn test_malformed_body_is_parse_error_with_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orgs"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = SnykClient::new("test-token", &mock_server.uri()).unwrap();
    let err = client.orgs().list().await.unwrap_err();

    assert!(matches!(err, SnykError::ParseError { .. }));
    assert_eq!(err.status_code(), Some(200));
}

#[tokio::test]
async fn test_server_error_uses_raw_body_without_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/group/g1/members"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = SnykClient::new("test-token", &mock_server.uri()).unwrap();
    let err = client.groups().list_members("g1").await.unwrap_err();

    match err {
        SnykError::ApiError { message, response } => {
            assert_eq!(message, "bad gateway");
            assert_eq!(response.status.as_u16(), 502);
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rate_limited_reads_retry_after() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orgs"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "30"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = SnykClient::new("test-token", &mock_server.uri()).unwrap();
    let err = client.orgs().list().await.unwrap_err();

    assert!(matches!(
        err,
        SnykError::RateLimited {
            retry_after_secs: Some(30),
            ..
        }
    ));
    assert_eq!(err.status_code(), Some(429));
}

#[tokio::test]
async fn test_connection_failure_is_http_error() {
    // Nothing listens on this port once the listener is dropped
    let uri = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };

    let client = SnykClient::new("test-token", &uri).unwrap();
    let err = client.orgs().list().await.unwrap_err();

    assert!(matches!(err, SnykError::HttpError(_)));
    assert!(err.response().is_none());
}

#[tokio::test]
async fn test_custom_http_client_is_used() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orgs"))
        .and(wiremock::matchers::header("user-agent", "custom-agent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"orgs": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let http = reqwest::Client::builder()
        .user_agent("custom-agent")
        .build()
        .unwrap();
    let client = SnykClient::new("test-token", &mock_server.uri())
        .unwrap()
        .with_http_client(http);

    client.orgs().list().await.unwrap();
}
