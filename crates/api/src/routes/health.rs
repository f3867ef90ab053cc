use axum::extract::State;
use axum::{routing::get, Json, Router};
use chrono::Utc;
use itemdesk_core::types::Timestamp;
use serde::Serialize;

use crate::state::AppState;

/// Service banner payload.
#[derive(Serialize)]
pub struct BannerResponse {
    pub message: String,
    pub timestamp: Timestamp,
    /// Name of the active storage backend.
    pub database: &'static str,
}

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database is reachable.
    pub db_healthy: bool,
}

/// GET / -- names the service and the backend it runs on.
async fn banner(State(state): State<AppState>) -> Json<BannerResponse> {
    let database = state.storage.backend().as_str();
    Json(BannerResponse {
        message: format!("Item service running on {database}"),
        timestamp: Utc::now(),
        database,
    })
}

/// GET /health -- returns service and database health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = itemdesk_db::health_check(state.storage.as_ref())
        .await
        .is_ok();

    let status = if db_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

/// Mount the banner and health routes (root level, NOT under `/api`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(banner))
        .route("/health", get(health_check))
}
