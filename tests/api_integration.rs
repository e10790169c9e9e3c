//! API Integration Tests for scatter-brain
//!
//! Tests the REST API endpoints using axum-test against an in-memory
//! SQLite database.

use axum::{body::Bytes, http::StatusCode, Router};
use axum_test::TestServer;
use chrono::{DateTime, Utc};
use scatter_brain::api;
use scatter_brain::db::{self, DbPool, PoolConfig};
use scatter_brain::models::ThoughtId;
use scatter_brain::AppState;
use serde_json::{json, Value};

// ============================================================================
// Test Setup Helpers
// ============================================================================

/// Build a test router over a freshly initialized database
async fn build_test_app() -> (TestServer, DbPool) {
    let pool = db::init_pool(":memory:", &PoolConfig::test())
        .await
        .expect("Failed to create test database");

    let state = AppState::new(pool.clone());
    state.init().await.expect("Failed to initialize schema");

    let app = Router::new().merge(api::routes()).with_state(state);
    let server = TestServer::new(app).expect("Failed to create test server");

    (server, pool)
}

fn timestamp(value: &Value) -> DateTime<Utc> {
    value
        .as_str()
        .expect("timestamp should be a string")
        .parse()
        .expect("timestamp should be RFC 3339")
}

async fn count(pool: &DbPool, table: &str) -> i64 {
    let (n,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .unwrap();
    n
}

// ============================================================================
// Ping
// ============================================================================

#[tokio::test]
async fn test_ping_returns_pong() {
    let (server, _pool) = build_test_app().await;

    let response = server.get("/api/ping").await;

    response.assert_status_ok();
    response.assert_json(&json!({ "Status": "pong", "Service": "scatter-brain" }));
}

// ============================================================================
// Thoughts Endpoint Tests
// ============================================================================

#[tokio::test]
async fn test_thought_lifecycle() {
    let (server, _pool) = build_test_app().await;

    // Create
    let response = server
        .post("/api/thoughts")
        .json(&json!({ "title": "hello", "content": "world" }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let created: Value = response.json();
    let id = created["id"].as_str().unwrap().to_string();
    assert!(ThoughtId::parse(&id).is_ok());
    assert_eq!(created["title"], "hello");
    assert_eq!(created["content"], "world");
    assert_eq!(created["create_time"], created["update_time"]);

    // Read back
    let response = server.get(&format!("/api/thoughts/{}", id)).await;
    response.assert_status_ok();
    let fetched: Value = response.json();
    assert_eq!(fetched, created);

    // Update
    let response = server
        .put(&format!("/api/thoughts/{}", id))
        .json(&json!({ "title": "hello2", "content": "world2" }))
        .await;
    response.assert_status(StatusCode::NO_CONTENT);
    assert!(response.text().is_empty());

    // Read the update
    let updated: Value = server.get(&format!("/api/thoughts/{}", id)).await.json();
    assert_eq!(updated["title"], "hello2");
    assert_eq!(updated["content"], "world2");
    assert_eq!(updated["create_time"], created["create_time"]);
    assert!(timestamp(&updated["update_time"]) > timestamp(&created["update_time"]));

    // Unknown id
    let response = server
        .get(&format!("/api/thoughts/{}", ThoughtId::new()))
        .await;
    response.assert_status_not_found();
}

#[tokio::test]
async fn test_list_thoughts() {
    let (server, _pool) = build_test_app().await;

    let response = server.get("/api/thoughts").await;
    response.assert_status_ok();
    response.assert_json(&json!([]));

    for title in ["one", "two"] {
        server
            .post("/api/thoughts")
            .json(&json!({ "title": title, "content": "" }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let body: Value = server.get("/api/thoughts").await.json();
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles.len(), 2);
    assert!(titles.contains(&"one"));
    assert!(titles.contains(&"two"));
}

#[tokio::test]
async fn test_create_thought_with_malformed_json() {
    let (server, pool) = build_test_app().await;

    let response = server
        .post("/api/thoughts")
        .bytes(Bytes::from_static(b"{\"title\": "))
        .content_type("application/json")
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
    assert_eq!(count(&pool, "thought").await, 0);
}

#[tokio::test]
async fn test_create_thought_missing_title_is_empty() {
    let (server, _pool) = build_test_app().await;

    let response = server
        .post("/api/thoughts")
        .json(&json!({ "content": "no title" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let created: Value = response.json();
    assert_eq!(created["title"], "");
    assert_eq!(created["content"], "no title");
}

#[tokio::test]
async fn test_null_text_fields_read_as_empty() {
    let (server, _pool) = build_test_app().await;

    let response = server
        .post("/api/thoughts")
        .json(&json!({ "title": "t", "content": null }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created: Value = response.json();
    assert_eq!(created["content"], "");

    let id = created["id"].as_str().unwrap();
    server
        .put(&format!("/api/thoughts/{}", id))
        .json(&json!({ "title": null }))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let updated: Value = server.get(&format!("/api/thoughts/{}", id)).await.json();
    assert_eq!(updated["title"], "");
    assert_eq!(updated["content"], "");
}

#[tokio::test]
async fn test_get_thought_with_invalid_id() {
    let (server, _pool) = build_test_app().await;

    let response = server.get("/api/thoughts/not-a-uuid").await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_update_unknown_thought_is_not_found() {
    let (server, pool) = build_test_app().await;

    let response = server
        .put(&format!("/api/thoughts/{}", ThoughtId::new()))
        .json(&json!({ "title": "t", "content": "c" }))
        .await;

    response.assert_status_not_found();
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "NO_ROW_UPDATED");
    assert_eq!(count(&pool, "thought").await, 0);
}

#[tokio::test]
async fn test_update_thought_with_invalid_id_or_body() {
    let (server, _pool) = build_test_app().await;

    server
        .put("/api/thoughts/1234")
        .json(&json!({ "title": "t", "content": "c" }))
        .await
        .assert_status_bad_request();

    let created: Value = server
        .post("/api/thoughts")
        .json(&json!({ "title": "hello", "content": "world" }))
        .await
        .json();
    let id = created["id"].as_str().unwrap();

    server
        .put(&format!("/api/thoughts/{}", id))
        .json(&json!({ "title": 42 }))
        .await
        .assert_status_bad_request();
}

// ============================================================================
// Labels Endpoint Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_list_labels() {
    let (server, _pool) = build_test_app().await;

    let response = server
        .post("/api/labels")
        .json(&json!({ "hex": "#fff", "description": "x" }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let label: Value = response.json();
    assert!(label["id"].is_i64());
    assert_eq!(label["hex"], "#fff");
    assert_eq!(label["description"], "x");

    let response = server.get("/api/labels").await;
    response.assert_status_ok();
    response.assert_json(&json!([label]));
}

#[tokio::test]
async fn test_create_label_without_hex() {
    let (server, _pool) = build_test_app().await;

    server
        .post("/api/labels")
        .json(&json!({ "description": "x" }))
        .await
        .assert_status_bad_request();
}

// ============================================================================
// Thought-Label Endpoint Tests
// ============================================================================

#[tokio::test]
async fn test_attach_label_to_thought() {
    let (server, _pool) = build_test_app().await;

    let thought: Value = server
        .post("/api/thoughts")
        .json(&json!({ "title": "hello", "content": "world" }))
        .await
        .json();
    let label: Value = server
        .post("/api/labels")
        .json(&json!({ "hex": "#f00", "description": "urgent" }))
        .await
        .json();

    let link = json!({ "thought_id": thought["id"], "label_id": label["id"] });
    let response = server.put("/api/thought-labels").json(&link).await;
    response.assert_status(StatusCode::CREATED);
    response.assert_json(&link);

    let joined: Value = server.get("/api/thought-labels").await.json();
    assert_eq!(joined, json!([{ "thought": thought, "labels": label }]));
}

#[tokio::test]
async fn test_attach_label_with_invalid_thought_id() {
    let (server, _pool) = build_test_app().await;

    server
        .put("/api/thought-labels")
        .json(&json!({ "thought_id": "nope", "label_id": 1 }))
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn test_attach_label_to_missing_thought_is_internal_error() {
    let (server, _pool) = build_test_app().await;

    let response = server
        .put("/api/thought-labels")
        .json(&json!({ "thought_id": ThoughtId::new(), "label_id": 1 }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_create_thought_with_label() {
    let (server, pool) = build_test_app().await;

    let label: Value = server
        .post("/api/labels")
        .json(&json!({ "hex": "#0f0", "description": "idea" }))
        .await
        .json();

    let response = server
        .post("/api/thought-labels")
        .json(&json!({ "title": "hello", "content": "world", "label_id": label["id"] }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.assert_text("thought created");

    assert_eq!(count(&pool, "thought").await, 1);
    assert_eq!(count(&pool, "thought_with_labels").await, 1);
}

#[tokio::test]
async fn test_create_thought_with_unknown_label_writes_nothing() {
    let (server, pool) = build_test_app().await;

    let response = server
        .post("/api/thought-labels")
        .json(&json!({ "title": "hello", "content": "world", "label_id": 999 }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(count(&pool, "thought").await, 0);
    assert_eq!(count(&pool, "thought_with_labels").await, 0);
}

#[tokio::test]
async fn test_create_thought_with_label_defaults_text_fields() {
    let (server, pool) = build_test_app().await;

    let label: Value = server
        .post("/api/labels")
        .json(&json!({ "hex": "#00f", "description": "later" }))
        .await
        .json();

    server
        .post("/api/thought-labels")
        .json(&json!({ "content": null, "label_id": label["id"] }))
        .await
        .assert_status(StatusCode::CREATED);

    let (title, content): (String, String) =
        sqlx::query_as("SELECT title, content FROM thought")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(title, "");
    assert_eq!(content, "");
}

#[tokio::test]
async fn test_create_thought_with_label_missing_label_id() {
    let (server, _pool) = build_test_app().await;

    server
        .post("/api/thought-labels")
        .json(&json!({ "title": "hello", "content": "world" }))
        .await
        .assert_status_bad_request();
}
