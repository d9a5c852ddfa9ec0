//! 401 recovery through auto-login

use serde_json::json;
use std::time::Duration;
use todo_core::{MemoryTokenStore, RestoreOutcome, SharedTokenStore};
use todo_http::client::{ApiRequest, ClientError, TodoClient};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn unauthorized() -> ResponseTemplate {
    ResponseTemplate::new(401).set_body_json(json!({"error": "Not logged in"}))
}

fn tasks() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!([
        {"_id": "t1", "text": "write tests", "done": false}
    ]))
}

fn client_with(server: &MockServer, tokens: &SharedTokenStore) -> TodoClient {
    TodoClient::builder()
        .base_url(server.uri())
        .token_store(tokens.clone())
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_recovered_request_returns_retried_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/todos"))
        .respond_with(unauthorized())
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/todos"))
        .respond_with(tasks())
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/todos/auto-login"))
        .and(body_json(json!({"token": "persistent-token"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let tokens = MemoryTokenStore::with_token("persistent-token").shared();
    let client = client_with(&mock_server, &tokens);

    let tasks = client.list_tasks().await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tokens.load().as_deref(), Some("persistent-token"));
    assert_eq!(client.recovery_epoch(), 1);
}

#[tokio::test]
async fn test_request_is_retried_at_most_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/todos"))
        .respond_with(unauthorized())
        .expect(2)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/todos/auto-login"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let tokens = MemoryTokenStore::with_token("persistent-token").shared();
    let client = client_with(&mock_server, &tokens);

    let result = client.list_tasks().await;
    assert!(matches!(result, Err(ClientError::AuthenticationFailed(_))));
}

#[tokio::test]
async fn test_no_token_skips_auto_login() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/todos"))
        .respond_with(unauthorized())
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/todos/auto-login"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = TodoClient::new(mock_server.uri()).unwrap();

    match client.list_tasks().await {
        Err(ClientError::AuthenticationFailed(message)) => assert_eq!(message, "Not logged in"),
        other => panic!("Expected original 401, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rejected_token_is_cleared_and_original_error_returned() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/todos"))
        .respond_with(unauthorized())
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/todos/auto-login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": "Invalid or expired token"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let tokens = MemoryTokenStore::with_token("stale-token").shared();
    let client = client_with(&mock_server, &tokens);

    match client.list_tasks().await {
        Err(ClientError::AuthenticationFailed(message)) => assert_eq!(message, "Not logged in"),
        other => panic!("Expected original 401, got {other:?}"),
    }
    assert_eq!(tokens.load(), None);
}

#[tokio::test]
async fn test_auto_login_non_200_success_counts_as_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/todos/auto-login"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let tokens = MemoryTokenStore::with_token("persistent-token").shared();
    let client = client_with(&mock_server, &tokens);

    assert_eq!(client.restore_session().await, RestoreOutcome::Rejected);
    assert_eq!(tokens.load(), None);
}

#[tokio::test]
async fn test_auto_login_401_is_never_recovered() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/todos/auto-login"))
        .respond_with(unauthorized())
        .expect(1)
        .mount(&mock_server)
        .await;

    let tokens = MemoryTokenStore::with_token("persistent-token").shared();
    let client = client_with(&mock_server, &tokens);

    let request = ApiRequest::post("/todos/auto-login")
        .json(&json!({"token": "persistent-token"}))
        .unwrap();
    let result = client.send(request).await;
    assert!(matches!(result, Err(ClientError::AuthenticationFailed(_))));
    assert_eq!(client.recovery_epoch(), 0);
}

#[tokio::test]
async fn test_non_401_errors_pass_through() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/todos"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"error": "nope"})))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/todos/auto-login"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let tokens = MemoryTokenStore::with_token("persistent-token").shared();
    let client = client_with(&mock_server, &tokens);

    assert!(matches!(client.list_tasks().await, Err(ClientError::Forbidden(_))));
}

#[tokio::test]
async fn test_concurrent_401s_share_one_auto_login() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/todos"))
        .respond_with(unauthorized())
        .up_to_n_times(3)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/todos"))
        .respond_with(tasks())
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/todos/auto-login"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(200)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let tokens = MemoryTokenStore::with_token("persistent-token").shared();
    let client = client_with(&mock_server, &tokens);

    let (a, b, c) = tokio::join!(client.list_tasks(), client.list_tasks(), client.list_tasks());
    assert!(a.is_ok());
    assert!(b.is_ok());
    assert!(c.is_ok());
    assert_eq!(client.recovery_epoch(), 1);
}

#[tokio::test]
async fn test_timed_out_auto_login_clears_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/todos/auto-login"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&mock_server)
        .await;

    let tokens = MemoryTokenStore::with_token("persistent-token").shared();
    let client = TodoClient::builder()
        .base_url(mock_server.uri())
        .timeout(Duration::from_millis(100))
        .token_store(tokens.clone())
        .build()
        .unwrap();

    assert_eq!(client.restore_session().await, RestoreOutcome::Rejected);
    assert_eq!(tokens.load(), None);
}

#[tokio::test]
async fn test_cancelled_recovery_keeps_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/todos/auto-login"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&mock_server)
        .await;

    let tokens = MemoryTokenStore::with_token("persistent-token").shared();
    let cancel = todo_core::CancellationToken::new();
    let client = client_with(&mock_server, &tokens).with_cancellation(cancel.clone());

    let canceller = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        cancel.cancel();
    });

    assert_eq!(client.restore_session().await, RestoreOutcome::Cancelled);
    assert_eq!(tokens.load().as_deref(), Some("persistent-token"));
    assert_eq!(client.recovery_epoch(), 0);
    canceller.await.unwrap();
}

#[tokio::test]
async fn test_request_cancelled_during_recovery_reports_cancelled() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/todos"))
        .respond_with(unauthorized())
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/todos/auto-login"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&mock_server)
        .await;

    let tokens = MemoryTokenStore::with_token("persistent-token").shared();
    let cancel = todo_core::CancellationToken::new();
    let client = client_with(&mock_server, &tokens).with_cancellation(cancel.clone());

    let canceller = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        cancel.cancel();
    });

    let result = client.list_tasks().await;
    assert!(matches!(result, Err(ClientError::Cancelled)), "got {result:?}");
    assert_eq!(tokens.load().as_deref(), Some("persistent-token"));
    canceller.await.unwrap();
}
