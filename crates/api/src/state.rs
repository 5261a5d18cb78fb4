use std::sync::Arc;

use todo_db::store::TodoStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Storage backend; `PgStore` in production, `MemoryStore` in tests.
    pub store: Arc<dyn TodoStore>,
}
