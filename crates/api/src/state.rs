use itemdesk_db::DbHandle;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the storage handle is an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Storage backend selected at startup.
    pub storage: DbHandle,
}
