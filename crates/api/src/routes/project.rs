//! Route definitions for the `/projects` resource.
//!
//! Also nests the task routes under `/projects/{title}/tasks`.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{project, task};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                                  -> list
/// POST   /                                  -> create
/// GET    /{title}                           -> get_by_title
/// PUT    /{title}                           -> update
/// DELETE /{title}                           -> delete
/// PUT    /{title}/archive                   -> archive
/// DELETE /{title}/archive                   -> restore
///
/// GET    /{title}/tasks                     -> list_by_project
/// POST   /{title}/tasks                     -> create
/// GET    /{title}/tasks/{id}                -> get_by_id
/// PUT    /{title}/tasks/{id}                -> update
/// DELETE /{title}/tasks/{id}                -> delete
/// PUT    /{title}/tasks/{id}/complete       -> complete
/// DELETE /{title}/tasks/{id}/complete       -> undo
/// ```
pub fn router() -> Router<AppState> {
    let task_routes = Router::new()
        .route("/", get(task::list_by_project).post(task::create))
        .route(
            "/{id}",
            get(task::get_by_id).put(task::update).delete(task::delete),
        )
        .route("/{id}/complete", put(task::complete).delete(task::undo));

    Router::new()
        .route("/", get(project::list).post(project::create))
        .route(
            "/{title}",
            get(project::get_by_title)
                .put(project::update)
                .delete(project::delete),
        )
        .route(
            "/{title}/archive",
            put(project::archive).delete(project::restore),
        )
        .nest("/{title}/tasks", task_routes)
}
