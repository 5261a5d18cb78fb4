pub mod health;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the API route tree.
///
/// Route hierarchy:
///
/// ```text
/// /projects                                   list, create
/// /projects/{title}                           get, update, delete
/// /projects/{title}/archive                   archive (PUT), restore (DELETE)
/// /projects/{title}/tasks                     list, create
/// /projects/{title}/tasks/{id}                get, update, delete
/// /projects/{title}/tasks/{id}/complete       complete (PUT), undo (DELETE)
/// ```
///
/// `{id}` only matches digits; see [`crate::extract::TaskPath`].
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/projects", project::router())
}
