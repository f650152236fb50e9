use todo_client::token::{FileTokenStore, TokenStore};
use todo_client::{Config, TodoClient};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::task_json;

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/token/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            serde_json::json!({ "access": "a1", "refresh": "r1" }),
        ))
        .expect(1)
        .mount(server)
        .await;
}

fn config(server: &MockServer, token_file: std::path::PathBuf) -> Config {
    Config::from_values(
        server.uri(),
        Some("alice".into()),
        Some("pw".into()),
        Some(token_file),
        Some(5),
    )
    .unwrap()
}

#[tokio::test]
async fn expired_session_is_refreshed_and_persisted() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let token_file = dir.path().join("tokens.json");
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/tasks/"))
        .and(header("Authorization", "Bearer a1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(
            serde_json::json!({ "detail": "Given token not valid for any token type" }),
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/token/refresh/"))
        .and(body_json(serde_json::json!({ "refresh": "r1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "access": "a2" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/tasks/"))
        .and(header("Authorization", "Bearer a2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([task_json(1, "write report", false)])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let todo = TodoClient::new(config(&server, token_file.clone())).unwrap();
    todo.login_from_config().await.unwrap();
    assert!(token_file.exists());

    let tasks = todo.tasks().list().await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "write report");

    let reopened = FileTokenStore::open(&token_file).unwrap();
    assert_eq!(reopened.get().as_deref(), Some("a2"));
    assert_eq!(reopened.refresh_token().as_deref(), Some("r1"));
}

#[tokio::test]
async fn logout_removes_token_file() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let token_file = dir.path().join("nested").join("tokens.json");
    mount_login(&server).await;

    let todo = TodoClient::new(config(&server, token_file.clone())).unwrap();
    todo.login("alice", "pw").await.unwrap();
    assert!(token_file.exists());

    // a second client over the same file starts logged in
    let again = TodoClient::new(config(&server, token_file.clone())).unwrap();
    assert!(again.is_logged_in());

    again.logout().unwrap();
    assert!(!token_file.exists());
    assert!(!again.is_logged_in());
}

#[tokio::test]
async fn expired_refresh_token_surfaces_unauthorized() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let token_file = dir.path().join("tokens.json");
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/tasks/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/token/refresh/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(
            serde_json::json!({ "detail": "Token is invalid or expired" }),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let todo = TodoClient::new(config(&server, token_file.clone())).unwrap();
    todo.login_from_config().await.unwrap();

    let err = todo.tasks().list().await.unwrap_err();
    assert!(err.is_unauthorized(), "unexpected error: {:?}", err);

    let reopened = FileTokenStore::open(&token_file).unwrap();
    assert_eq!(reopened.get().as_deref(), Some("a1"));
}
