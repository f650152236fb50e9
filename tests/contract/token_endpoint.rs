use std::sync::Arc;

use reqwest::Client;
use todo_client::endpoint::TokenEndpoint;
use todo_client::token::{MemoryTokenStore, TokenStore};
use todo_client::{Error, TodoClient, TokenRefresher};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{config, pair};

#[tokio::test]
async fn obtain_posts_credentials_and_returns_pair() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token/"))
        .and(body_json(serde_json::json!({ "username": "alice", "password": "pw" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            serde_json::json!({ "access": "a1", "refresh": "r1" }),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let pair = TokenEndpoint::new(Client::new(), &server.uri())
        .obtain("alice", "pw")
        .await
        .unwrap();
    assert_eq!(pair.access, "a1");
    assert_eq!(pair.refresh, "r1");
}

#[tokio::test]
async fn obtain_surfaces_detail_on_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "detail": "No active account found with the given credentials"
        })))
        .mount(&server)
        .await;

    let err = TokenEndpoint::new(Client::new(), &server.uri())
        .obtain("alice", "wrong")
        .await
        .unwrap_err();
    match err {
        Error::Auth(msg) => assert!(msg.contains("No active account")),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn obtain_requires_both_tokens() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "access": "a1" })))
        .mount(&server)
        .await;

    let err = TokenEndpoint::new(Client::new(), &server.uri())
        .obtain("alice", "pw")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Auth(_)), "unexpected error: {:?}", err);
}

#[tokio::test]
async fn refresh_without_refresh_token_makes_no_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token/refresh/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let store = MemoryTokenStore::with_access("a1");
    let err = TokenEndpoint::new(Client::new(), &server.uri())
        .refresh(&store)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::MissingRefreshToken));
}

#[tokio::test]
async fn refresh_writes_new_access_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token/refresh/"))
        .and(body_json(serde_json::json!({ "refresh": "r1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "access": "a2" })))
        .expect(1)
        .mount(&server)
        .await;

    let store = pair("a1", "r1");
    TokenEndpoint::new(Client::new(), &server.uri())
        .refresh(&store)
        .await
        .unwrap();
    assert_eq!(store.get().as_deref(), Some("a2"));
    assert_eq!(store.refresh_token().as_deref(), Some("r1"));
}

#[tokio::test]
async fn login_stores_pair_and_logout_clears_it() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            serde_json::json!({ "access": "a1", "refresh": "r1" }),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let store = MemoryTokenStore::new();
    let todo = TodoClient::with_store(config(&server), Arc::new(store.clone())).unwrap();
    assert!(!todo.is_logged_in());

    todo.login("alice", "pw").await.unwrap();
    assert!(todo.is_logged_in());
    assert_eq!(store.refresh_token().as_deref(), Some("r1"));

    todo.logout().unwrap();
    assert!(store.snapshot().is_empty());
}

#[tokio::test]
async fn login_from_config_requires_credentials() {
    let server = MockServer::start().await;
    let todo = TodoClient::with_store(config(&server), Arc::new(MemoryTokenStore::new())).unwrap();
    let err = todo.login_from_config().await.unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}
