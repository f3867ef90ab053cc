//! HTTP-level integration tests for the `/api/items` endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router,
//! backed by an in-memory SQLite database.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, delete, get, post_json, put_json};
use serde_json::json;

/// Create an item through the API and return its JSON representation.
async fn create(app: &axum::Router, body: serde_json::Value) -> serde_json::Value {
    let response = post_json(app.clone(), "/api/items", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

async fn list_len(app: &axum::Router) -> usize {
    let response = get(app.clone(), "/api/items").await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await.as_array().unwrap().len()
}

// ---------------------------------------------------------------------------
// Test: list starts empty
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_empty_returns_empty_array() {
    let app = build_test_app().await;
    let response = get(app, "/api/items").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json, json!([]));
}

// ---------------------------------------------------------------------------
// Test: create then get returns the same fields and id
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_then_get_round_trips_fields() {
    let app = build_test_app().await;
    let created = create(
        &app,
        json!({ "name": "Lamp", "description": "Desk lamp", "status": "inactive" }),
    )
    .await;

    let id = created["id"].as_i64().expect("id should be populated");
    assert_eq!(created["name"], "Lamp");
    assert!(created["createdAt"].is_string());
    assert!(created["updatedAt"].is_string());

    let response = get(app, &format!("/api/items/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let fetched = body_json(response).await;
    assert_eq!(fetched["id"], id);
    assert_eq!(fetched["name"], "Lamp");
    assert_eq!(fetched["description"], "Desk lamp");
    assert_eq!(fetched["status"], "inactive");
}

#[tokio::test]
async fn create_defaults_status_to_active() {
    let app = build_test_app().await;
    let created = create(&app, json!({ "name": "Chair" })).await;

    assert_eq!(created["status"], "active");
    assert!(created["description"].is_null());
}

// ---------------------------------------------------------------------------
// Test: validation failures return 400 and write nothing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_without_name_returns_400_and_writes_nothing() {
    let app = build_test_app().await;

    for body in [json!({}), json!({ "name": "" }), json!({ "description": "orphan" })] {
        let response = post_json(app.clone(), "/api/items", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["error"], "name is required");
    }

    assert_eq!(list_len(&app).await, 0);
}

#[tokio::test]
async fn create_with_unknown_status_returns_400() {
    let app = build_test_app().await;
    let response = post_json(
        app.clone(),
        "/api/items",
        json!({ "name": "Crate", "status": "archived" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    assert_eq!(list_len(&app).await, 0);
}

#[tokio::test]
async fn create_with_malformed_json_returns_400() {
    let app = build_test_app().await;
    let response = common::send(
        app,
        axum::http::Method::POST,
        "/api/items",
        Some(json!(["not", "an", "object"])),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn create_with_positional_array_body_returns_400_and_writes_nothing() {
    let app = build_test_app().await;
    let response = post_json(app.clone(), "/api/items", json!(["Lamp", null, "active"])).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
    assert_eq!(list_len(&app).await, 0);
}

// ---------------------------------------------------------------------------
// Test: nonexistent ids return 404 regardless of payload
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_missing_returns_404() {
    let app = build_test_app().await;
    let response = get(app, "/api/items/9999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Item with id 9999 not found");
}

#[tokio::test]
async fn update_missing_returns_404_for_valid_and_invalid_payloads() {
    let app = build_test_app().await;

    let valid = put_json(app.clone(), "/api/items/9999", json!({ "name": "Ghost" })).await;
    assert_eq!(valid.status(), StatusCode::NOT_FOUND);

    let invalid = put_json(app, "/api/items/9999", json!({ "name": "" })).await;
    assert_eq!(invalid.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_missing_returns_404() {
    let app = build_test_app().await;
    let response = delete(app, "/api/items/9999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_numeric_id_is_rejected() {
    let app = build_test_app().await;
    let response = get(app, "/api/items/abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: update overwrites mutable fields only
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_overwrites_all_mutable_fields() {
    let app = build_test_app().await;
    let created = create(
        &app,
        json!({ "name": "Old", "description": "old text", "status": "active" }),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let response = put_json(
        app.clone(),
        &format!("/api/items/{id}"),
        json!({ "name": "New", "description": "new text", "status": "inactive" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let updated = body_json(response).await;
    assert_eq!(updated["id"], id);
    assert_eq!(updated["name"], "New");
    assert_eq!(updated["description"], "new text");
    assert_eq!(updated["status"], "inactive");
    assert_eq!(updated["createdAt"], created["createdAt"]);

    let before: chrono::DateTime<chrono::Utc> =
        serde_json::from_value(created["updatedAt"].clone()).unwrap();
    let after: chrono::DateTime<chrono::Utc> =
        serde_json::from_value(updated["updatedAt"].clone()).unwrap();
    assert!(after >= before, "updatedAt must not go backwards");
}

#[tokio::test]
async fn update_with_empty_name_on_existing_item_returns_400() {
    let app = build_test_app().await;
    let created = create(&app, json!({ "name": "Keep" })).await;
    let id = created["id"].as_i64().unwrap();

    let response = put_json(app.clone(), &format!("/api/items/{id}"), json!({ "name": "" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let fetched = body_json(get(app, &format!("/api/items/{id}")).await).await;
    assert_eq!(fetched["name"], "Keep");
}

#[tokio::test]
async fn update_without_status_resets_to_active() {
    let app = build_test_app().await;
    let created = create(&app, json!({ "name": "Desk", "status": "inactive" })).await;
    let id = created["id"].as_i64().unwrap();

    let response = put_json(app.clone(), &format!("/api/items/{id}"), json!({ "name": "Desk" })).await;
    assert_eq!(response.status(), StatusCode::OK);

    let updated = body_json(response).await;
    assert_eq!(updated["status"], "active");
    assert!(updated["description"].is_null());
}

#[tokio::test]
async fn update_with_unknown_status_returns_400_and_keeps_row() {
    let app = build_test_app().await;
    let created = create(
        &app,
        json!({ "name": "Shelf", "description": "Oak", "status": "inactive" }),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let response = put_json(
        app.clone(),
        &format!("/api/items/{id}"),
        json!({ "name": "Renamed", "status": "archived" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let fetched = body_json(get(app, &format!("/api/items/{id}")).await).await;
    assert_eq!(fetched, created);
}

// ---------------------------------------------------------------------------
// Test: delete and list bookkeeping
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_returns_confirmation_with_id() {
    let app = build_test_app().await;
    let created = create(&app, json!({ "name": "Temp" })).await;
    let id = created["id"].as_i64().unwrap();

    let response = delete(app.clone(), &format!("/api/items/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["id"], id);
    assert!(json["message"].is_string());

    let again = get(app, &format!("/api/items/{id}")).await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_reflects_creates_minus_deletes_newest_first() {
    let app = build_test_app().await;
    let mut ids = Vec::new();
    for n in 0..4 {
        let created = create(&app, json!({ "name": format!("Item {n}") })).await;
        ids.push(created["id"].as_i64().unwrap());
    }
    delete(app.clone(), &format!("/api/items/{}", ids[1])).await;

    let response = get(app, "/api/items").await;
    let listed: Vec<i64> = body_json(response)
        .await
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect();

    assert_eq!(listed, vec![ids[3], ids[2], ids[0]]);
}

// ---------------------------------------------------------------------------
// Test: storage failure maps to a sanitized 500
// ---------------------------------------------------------------------------

#[tokio::test]
async fn closed_storage_returns_500() {
    let storage = common::test_storage().await;
    let app = common::build_app(storage.clone());
    itemdesk_db::Storage::close(storage.as_ref()).await;

    let response = get(app, "/api/items").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}
