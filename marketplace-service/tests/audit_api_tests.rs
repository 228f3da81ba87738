mod common;

use common::assert_error_key;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

async fn list_logs(app: &TestApp, token: &str, query: &str) -> Value {
    let response = app
        .get(&format!("/logs{}", query))
        .bearer_auth(token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    response.json().await.expect("Failed to parse response")
}

#[tokio::test]
async fn test_product_mutations_are_audited() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    let id = app.create_product(&token, "Chair", 45.0, 2).await;

    app.put(&format!("/products/{}", id))
        .bearer_auth(&token)
        .json(&json!({ "name": "Stool", "stock": 5 }))
        .send()
        .await
        .expect("Failed to execute request");

    let body = list_logs(&app, &token, "").await;
    let logs = body["data"]["logs"].as_array().unwrap();
    assert_eq!(logs.len(), 2);

    assert_eq!(logs[0]["title"], "Edited product");
    assert_eq!(
        logs[0]["action"],
        r#"Edited product with changes: name changed from "Chair" to "Stool", stock changed from "2" to "5""#
    );
    assert_eq!(logs[1]["title"], "Added new product");
    assert_eq!(logs[1]["action"], r#"Added new product with title "Chair""#);

    for log in logs {
        assert_eq!(log["entity"], "Product");
        assert_eq!(log["actor_role"], "admin");
    }
}

#[tokio::test]
async fn test_noop_update_writes_no_entry() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    let id = app.create_product(&token, "Chair", 45.0, 2).await;

    let response = app
        .put(&format!("/products/{}", id))
        .bearer_auth(&token)
        .json(&json!({ "price": 45.0 }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body = list_logs(&app, &token, "").await;
    assert_eq!(body["data"]["meta"]["totalItems"], 1);
}

#[tokio::test]
async fn test_create_audit_entry_manually() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let response = app
        .post("/logs")
        .bearer_auth(&token)
        .json(&json!({
            "title": "Maintenance",
            "action": "Reindexed catalogue",
            "entity": "System"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["title"], "Maintenance");
    assert_eq!(body["data"]["entity"], "System");
    assert!(body["data"]["created_at"].is_string());

    let body = list_logs(&app, &token, "?search=reindexed").await;
    assert_eq!(body["data"]["logs"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_audit_entry_requires_fields() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    for (payload, key) in [
        (json!({ "action": "a", "entity": "e" }), "title_IS_REQUIRED"),
        (json!({ "title": "t", "action": " ", "entity": "e" }), "action_IS_REQUIRED"),
        (json!({ "title": "t", "action": "a" }), "entity_IS_REQUIRED"),
    ] {
        let response = app
            .post("/logs")
            .bearer_auth(&token)
            .json(&payload)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "{}", key);
        let body: Value = response.json().await.expect("Failed to parse response");
        assert_error_key(&body, key);
    }
}

#[tokio::test]
async fn test_audit_log_is_admin_only() {
    let app = TestApp::spawn().await;
    let token = app.token_for("user@example.com", "user").await;

    let response = app
        .get("/logs")
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_error_key(&body, "FORBIDDEN");
}

#[tokio::test]
async fn test_malformed_query_uses_error_envelope() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let response = app
        .get("/logs?pageSize=5&pageSize=6")
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_error_key(&body, "page_IS_INVALID");
}

#[tokio::test]
async fn test_audit_log_paginates() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    for name in ["A", "B", "C"] {
        app.create_product(&token, name, 1.0, 1).await;
    }

    let body = list_logs(&app, &token, "?page=2&pageSize=2").await;
    let logs = body["data"]["logs"].as_array().unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0]["action"], r#"Added new product with title "A""#);
    assert_eq!(body["data"]["meta"]["totalPages"], 2);
    assert_eq!(body["data"]["meta"]["itemsOnPage"], 1);
}
