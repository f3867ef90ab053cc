//! Handlers for the `/items` resource.
//!
//! Validation always runs before any write. Storage failures surface as
//! [`AppError::Storage`] and are reported as a sanitized 500.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use itemdesk_core::error::CoreError;
use itemdesk_core::item::{ItemInput, NewItem, ITEM_ENTITY};
use itemdesk_core::types::DbId;
use itemdesk_db::repositories::ItemRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Body returned by a successful delete.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: &'static str,
    pub id: DbId,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/items
///
/// List all items, newest first.
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let items = ItemRepo::list(state.storage.as_ref()).await?;
    Ok(Json(items))
}

/// GET /api/items/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let item = ItemRepo::find_by_id(state.storage.as_ref(), id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(item))
}

/// POST /api/items
///
/// Create an item. `status` defaults to `active`.
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<ItemInput>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let input = validate(payload)?;
    let item = ItemRepo::create(state.storage.as_ref(), &input).await?;
    tracing::info!(id = item.id, "Item created");
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /api/items/{id}
///
/// Overwrite name, description and status. A missing item is reported as
/// 404 even when the payload is invalid.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    payload: Result<Json<ItemInput>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let input = match validate(payload) {
        Ok(input) => input,
        Err(err) => {
            if ItemRepo::find_by_id(state.storage.as_ref(), id).await?.is_none() {
                return Err(not_found(id));
            }
            return Err(err);
        }
    };

    let item = ItemRepo::update(state.storage.as_ref(), id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(id, "Item updated");
    Ok(Json(item))
}

/// DELETE /api/items/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !ItemRepo::delete(state.storage.as_ref(), id).await? {
        return Err(not_found(id));
    }
    tracing::info!(id, "Item deleted");
    Ok(Json(DeleteResponse {
        message: "Item deleted",
        id,
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Unwrap the JSON body and validate it into a writable item.
fn validate(payload: Result<Json<ItemInput>, JsonRejection>) -> AppResult<NewItem> {
    let Json(input) = payload?;
    Ok(input.into_new_item()?)
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: ITEM_ENTITY,
        id,
    })
}
