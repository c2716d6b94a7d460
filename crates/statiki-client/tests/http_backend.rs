//! HTTP backend tests against a local mock server

use serde_json::json;
use statiki_client::{HttpBackend, HttpBackendConfig};
use statiki_protocol::{ConfigureRequest, CreateRepoRequest, FileEntry, RepoName};
use statiki_workflow::{BackendError, RepoBackend};
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn backend_for(server: &MockServer) -> HttpBackend {
    HttpBackend::new(HttpBackendConfig::new(server.uri())).unwrap()
}

fn create_request(name: &str) -> CreateRepoRequest {
    CreateRepoRequest::new(RepoName::parse(name).unwrap())
}

#[tokio::test]
async fn test_create_repo_posts_form_and_decodes_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/create_repo"))
        .and(body_string("repo_name=foo"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "created": true,
            "exists": false,
            "overwrite": false,
            "full_name": "org/foo",
            "message": "Created",
            "contents": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = backend_for(&server)
        .create_repo(&create_request("foo"))
        .await
        .unwrap();

    assert!(result.created);
    assert_eq!(result.full_name, "org/foo");
    assert_eq!(result.message, "Created");
}

#[tokio::test]
async fn test_create_repo_existing_with_contents() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/create_repo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "exists": true,
            "overwrite": true,
            "full_name": "org/bar",
            "message": "Already exists",
            "contents": [
                {"name": ".travis.yml", "content": "language: python"},
                {"name": "a.txt", "content": "hi"}
            ]
        })))
        .mount(&server)
        .await;

    let result = backend_for(&server)
        .create_repo(&create_request("bar"))
        .await
        .unwrap();

    assert!(result.exists);
    assert!(result.overwrite);
    assert_eq!(
        result.contents,
        vec![
            FileEntry::new(".travis.yml", "language: python"),
            FileEntry::new("a.txt", "hi"),
        ]
    );
}

#[tokio::test]
async fn test_configure_posts_overwrite_and_full_name() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/manage"))
        .and(body_string("overwrite=false&full_name=org%2Ffoo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Configured"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = backend_for(&server)
        .configure(&ConfigureRequest {
            overwrite: false,
            full_name: "org/foo".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(result.message, "Configured");
}

#[tokio::test]
async fn test_error_status_keeps_raw_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/create_repo"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let err = backend_for(&server)
        .create_repo(&create_request("foo"))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        BackendError::Transport {
            status: Some(429),
            body: "rate limited".to_string(),
        }
    );
    assert_eq!(err.display_body(), "rate limited");
}

#[tokio::test]
async fn test_undecodable_success_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/manage"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let err = backend_for(&server)
        .configure(&ConfigureRequest {
            overwrite: true,
            full_name: "org/bar".to_string(),
        })
        .await
        .unwrap_err();

    match err {
        BackendError::Malformed { reason } => assert!(reason.contains("<html>login</html>")),
        other => panic!("expected malformed response, got {:?}", other),
    }
}

#[tokio::test]
async fn test_auth_token_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/manage"))
        .and(header("authorization", "token s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let backend =
        HttpBackend::new(HttpBackendConfig::new(server.uri()).with_auth_token("s3cret")).unwrap();
    let result = backend
        .configure(&ConfigureRequest {
            overwrite: false,
            full_name: "org/foo".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(result.message, "ok");
}

#[tokio::test]
async fn test_connection_failure_is_transport_without_status() {
    // Nothing listens on the discard port
    let backend = HttpBackend::new(HttpBackendConfig::new("http://127.0.0.1:9")).unwrap();

    let err = backend
        .create_repo(&create_request("foo"))
        .await
        .unwrap_err();

    assert!(matches!(err, BackendError::Transport { status: None, .. }));
}
