//! Integration tests for the to-do HTTP client

use serde_json::json;
use std::time::Duration;
use todo_core::{CancellationToken, MemoryTokenStore};
use todo_http::client::{ClientError, TodoClient};
use todo_http::types::TaskUpdate;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_client_builder() {
    let client = TodoClient::builder()
        .base_url("http://localhost:5000/")
        .timeout(Duration::from_secs(3))
        .build();

    assert!(client.is_ok());
    let client = client.unwrap();
    assert_eq!(client.base_url(), "http://localhost:5000");
    assert_eq!(client.timeout(), Some(Duration::from_secs(3)));
}

#[tokio::test]
async fn test_client_builder_requires_base_url() {
    let result = TodoClient::builder().build();
    assert!(matches!(result, Err(ClientError::Configuration(_))));
}

#[tokio::test]
async fn test_client_builder_rejects_invalid_url() {
    let result = TodoClient::builder().base_url("not a url").build();
    assert!(matches!(result, Err(ClientError::Configuration(_))));
}

#[tokio::test]
async fn test_login_with_remember_me_stores_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/todos/login"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "email": "ada@example.com",
            "password": "hunter22",
            "remember_me": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Login successful",
            "user_id": "u1",
            "token": "persistent-token"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let tokens = MemoryTokenStore::new().shared();
    let client = TodoClient::builder()
        .base_url(mock_server.uri())
        .token_store(tokens.clone())
        .build()
        .unwrap();

    let response = client.login("ada@example.com", "hunter22", true).await.unwrap();
    assert_eq!(response.user_id, "u1");
    assert_eq!(tokens.load().as_deref(), Some("persistent-token"));
}

#[tokio::test]
async fn test_login_without_token_leaves_store_untouched() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/todos/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Login successful",
            "user_id": "u1"
        })))
        .mount(&mock_server)
        .await;

    let tokens = MemoryTokenStore::new().shared();
    let client = TodoClient::builder()
        .base_url(mock_server.uri())
        .token_store(tokens.clone())
        .build()
        .unwrap();

    client.login("ada@example.com", "hunter22", false).await.unwrap();
    assert_eq!(tokens.load(), None);
}

#[tokio::test]
async fn test_register_conflict() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/todos/register"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({"error": "User already exists"})),
        )
        .mount(&mock_server)
        .await;

    let client = TodoClient::new(mock_server.uri()).unwrap();
    let result = client.register("ada@example.com", "hunter22").await;

    match result {
        Err(ClientError::Conflict(message)) => assert_eq!(message, "User already exists"),
        other => panic!("Expected conflict, got {other:?}"),
    }
}

#[tokio::test]
async fn test_register_created() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/todos/register"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "message": "User registered",
            "user_id": "u2"
        })))
        .mount(&mock_server)
        .await;

    let client = TodoClient::new(mock_server.uri()).unwrap();
    let response = client.register("grace@example.com", "cobol").await.unwrap();
    assert_eq!(response.user_id, "u2");
}

#[tokio::test]
async fn test_logout_sends_and_clears_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/todos/logout"))
        .and(body_json(json!({"token": "persistent-token"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Logged out"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let tokens = MemoryTokenStore::with_token("persistent-token").shared();
    let client = TodoClient::builder()
        .base_url(mock_server.uri())
        .token_store(tokens.clone())
        .build()
        .unwrap();

    client.logout().await.unwrap();
    assert_eq!(tokens.load(), None);
}

#[tokio::test]
async fn test_logout_without_session_is_ok() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/todos/logout"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "No active session"})),
        )
        .mount(&mock_server)
        .await;

    let client = TodoClient::new(mock_server.uri()).unwrap();
    assert!(client.logout().await.is_ok());
}

#[tokio::test]
async fn test_session_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/todos/session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "logged_in": true,
            "user": {"email": "ada@example.com", "_id": "u1"}
        })))
        .mount(&mock_server)
        .await;

    let client = TodoClient::new(mock_server.uri()).unwrap();
    let status = client.session_status().await.unwrap();
    assert!(status.logged_in);
    assert_eq!(status.user.unwrap().id, "u1");
}

#[tokio::test]
async fn test_task_crud() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/todos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"_id": "t1", "text": "write tests", "done": false},
            {"_id": "t2", "text": "ship", "done": true}
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/todos"))
        .and(body_json(json!({"text": "buy milk"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "_id": "t3", "text": "buy milk", "done": false
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/todos/t3"))
        .and(body_json(json!({"done": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "t3", "text": "buy milk", "done": true
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/todos/t3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Task deleted"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = TodoClient::new(mock_server.uri()).unwrap();

    let tasks = client.list_tasks().await.unwrap();
    assert_eq!(tasks.len(), 2);
    assert!(tasks[1].done);

    let created = client.create_task("  buy milk ").await.unwrap();
    assert_eq!(created.id, "t3");

    let updated = client.update_task("t3", &TaskUpdate::done(true)).await.unwrap();
    assert!(updated.done);

    client.delete_task("t3").await.unwrap();
}

#[tokio::test]
async fn test_invalid_task_input_never_hits_network() {
    let mock_server = MockServer::start().await;
    let client = TodoClient::new(mock_server.uri()).unwrap();

    assert!(matches!(client.create_task("   ").await, Err(ClientError::BadRequest(_))));
    assert!(matches!(
        client.update_task("t1", &TaskUpdate::default()).await,
        Err(ClientError::BadRequest(_))
    ));
    assert!(matches!(client.delete_task("../session").await, Err(ClientError::BadRequest(_))));

    let received = mock_server.received_requests().await.unwrap();
    assert!(received.is_empty());
}

#[tokio::test]
async fn test_error_handling() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/todos"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let client = TodoClient::new(mock_server.uri()).unwrap();
    let result = client.list_tasks().await;

    match result {
        Err(ClientError::ServerError { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("Expected server error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_per_call_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/todos"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let client = TodoClient::builder()
        .base_url(mock_server.uri())
        .timeout(Duration::from_millis(100))
        .build()
        .unwrap();

    let result = client.list_tasks().await;
    assert!(matches!(result, Err(ClientError::Timeout(_))));
}

#[tokio::test]
async fn test_cancellation_aborts_in_flight_call() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/todos"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let cancel = CancellationToken::new();
    let client = TodoClient::builder()
        .base_url(mock_server.uri())
        .no_timeout()
        .build()
        .unwrap()
        .with_cancellation(cancel.clone());

    let canceller = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        cancel.cancel();
    });

    let result = client.list_tasks().await;
    assert!(matches!(result, Err(ClientError::Cancelled)));
    canceller.await.unwrap();
}
