//! Integration tests for `GlobalviewClient` transport and auth using wiremock.

use globalview_client::{ClientError, GlobalviewClient, QueryParams, RequestOptions};
use reqwest::Method;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer, token: Option<&str>) -> GlobalviewClient {
    GlobalviewClient::with_base_url(&format!("{}/api", server.uri()), token.map(str::to_owned))
        .expect("client construction should not fail")
}

#[tokio::test]
async fn missing_token_fails_without_network_call() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server, None);
    let err = client
        .get_json(&["globalview", "bi", "kpis"], &QueryParams::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::MissingToken(_)));
    let message = err.to_string();
    assert!(message.starts_with("Missing token"));
    assert!(message.contains("gv_token"));
    assert!(message.contains("GLOBALVIEW_API_TOKEN"));
}

#[tokio::test]
async fn sends_bearer_json_and_no_store_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/globalview/bi/kpis"))
        .and(header("authorization", "Bearer tok-1"))
        .and(header("content-type", "application/json"))
        .and(header("cache-control", "no-store"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server, Some("tok-1"));
    let body = client
        .get_json(&["globalview", "bi", "kpis"], &QueryParams::new())
        .await
        .expect("request should succeed");

    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn non_2xx_carries_status_and_raw_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/globalview/calls"))
        .respond_with(ResponseTemplate::new(502).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let client = test_client(&server, Some("tok"));
    let err = client
        .get_json(&["globalview", "calls"], &QueryParams::new())
        .await
        .unwrap_err();

    match err {
        ClientError::Status { status, body } => {
            assert_eq!(status, 502);
            assert_eq!(body, "upstream exploded");
        }
        other => panic!("expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn caller_headers_override_defaults() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/globalview/investors"))
        .and(header("cache-control", "max-age=0"))
        .and(header("x-request-source", "cli"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server, Some("tok"));
    let url = reqwest::Url::parse(&format!("{}/api/globalview/investors", server.uri())).unwrap();
    let options = RequestOptions {
        headers: vec![
            ("Cache-Control".into(), "max-age=0".into()),
            ("X-Request-Source".into(), "cli".into()),
        ],
        ..RequestOptions::default()
    };
    let body: serde_json::Value = client
        .request(Method::GET, url, None, &options)
        .await
        .expect("request should succeed");

    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn empty_success_body_decodes_as_null() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/globalview/cache/clear"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server, Some("tok"));
    client.clear_cache().await.expect("cache clear should succeed");
}

#[tokio::test]
async fn invalid_json_is_a_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/globalview/bi/kpis"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server, Some("tok"));
    let err = client
        .get_json(&["globalview", "bi", "kpis"], &QueryParams::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Deserialize { .. }));
}

#[tokio::test]
async fn login_posts_credentials_without_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/globalview/auth/login"))
        .and(body_json(serde_json::json!({
            "email": "ana@example.com",
            "password": "hunter2"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token": "jwt-abc",
            "user": {"id": "U1", "email": "ana@example.com", "fullName": "Ana", "role": "ADMIN"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server, None);
    let response = client
        .login("ana@example.com", "hunter2")
        .await
        .expect("login should succeed");

    assert_eq!(response.token, "jwt-abc");
    assert_eq!(response.user.full_name.as_deref(), Some("Ana"));
}

#[tokio::test]
async fn rejected_login_surfaces_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/globalview/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
        .mount(&server)
        .await;

    let client = test_client(&server, None);
    let err = client.login("ana@example.com", "wrong").await.unwrap_err();

    assert_eq!(err.status(), Some(401));
}

#[tokio::test]
async fn absent_filters_are_not_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/globalview/bi/top-leaders"))
        .and(query_param("startDate", "2025-01-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"leaders": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server, Some("tok"));
    let query = globalview_client::ListQuery::default().with_range(Some("2025-01-01".into()), None);
    client
        .get_top_leaders(&query)
        .await
        .expect("request should succeed");

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.query(), Some("startDate=2025-01-01"));
}
