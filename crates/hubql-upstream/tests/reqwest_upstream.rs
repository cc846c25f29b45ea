//! Integration tests for the `reqwest` upstream client against a mock HTTP server.

use hubql_upstream::{GITHUB_V3_ACCEPT, ReqwestUpstream, UpstreamClient, UpstreamConfig, UpstreamError};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client() -> ReqwestUpstream {
    let config = UpstreamConfig {
        user_agent: "hubql-tests".into(),
        ..Default::default()
    };
    ReqwestUpstream::new(&config).expect("build client")
}

#[tokio::test]
async fn test_get_json_decodes_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .and(header("user-agent", "hubql-tests"))
        .and(header("accept", GITHUB_V3_ACCEPT))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"login": "octocat", "id": 583231})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let body = client()
        .get_json(&format!("{}/users/octocat", mock_server.uri()))
        .await
        .unwrap();

    assert_eq!(body["login"], "octocat");
    assert_eq!(body["id"], 583231);
}

#[tokio::test]
async fn test_query_string_is_forwarded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/octocat/followers"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"login": "bob"}])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let body = client()
        .get_json(&format!("{}/users/octocat/followers?page=2", mock_server.uri()))
        .await
        .unwrap();

    assert_eq!(body, json!([{"login": "bob"}]));
}

#[tokio::test]
async fn test_not_found_is_status_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/ghost"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .mount(&mock_server)
        .await;

    let err = client()
        .get_json(&format!("{}/users/ghost", mock_server.uri()))
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert!(matches!(err, UpstreamError::Status { status: 404, .. }));
}

#[tokio::test]
async fn test_invalid_json_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
        .mount(&mock_server)
        .await;

    let err = client()
        .get_json(&format!("{}/users/octocat", mock_server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, UpstreamError::Decode { .. }));
}

#[tokio::test]
async fn test_no_content_is_null() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/octocat/following/bob"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let body = client()
        .get_json(&format!("{}/users/octocat/following/bob", mock_server.uri()))
        .await
        .unwrap();

    assert!(body.is_null());
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Reserve a free port, then release it so nothing is listening there
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    let url = format!("http://{addr}/users/octocat");

    let err = client().get_json(&url).await.unwrap_err();

    assert!(matches!(err, UpstreamError::Transport { .. }));
}

#[tokio::test]
async fn test_every_call_reaches_upstream() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = client();
    let url = format!("{}/users/octocat/repos", mock_server.uri());
    client.get_json(&url).await.unwrap();
    client.get_json(&url).await.unwrap();
}
