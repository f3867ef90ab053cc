#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use itemdesk_db::{BackendConfig, DatabaseConfig, SqliteStorage, Storage};
use tower::ServiceExt;

use itemdesk_api::config::ServerConfig;
use itemdesk_api::router::build_app_router;
use itemdesk_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        database: DatabaseConfig {
            backend: BackendConfig::Sqlite {
                path: ":memory:".to_string(),
            },
            max_connections: 1,
        },
    }
}

/// Fresh in-memory SQLite storage with migrations applied.
pub async fn test_storage() -> Arc<SqliteStorage> {
    let storage = SqliteStorage::in_memory().await.unwrap();
    storage.run_migrations().await.unwrap();
    Arc::new(storage)
}

/// Build the full application router over the given storage, using the same
/// middleware stack as production.
pub fn build_app(storage: Arc<SqliteStorage>) -> Router {
    let config = test_config();
    let state = AppState { storage };
    build_app_router(state, &config)
}

/// Build the application over a fresh in-memory database.
pub async fn build_test_app() -> Router {
    build_app(test_storage().await)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
