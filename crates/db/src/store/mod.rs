//! Backend-agnostic storage interface used by the HTTP handlers.
//!
//! [`PgStore`] is the production backend; [`MemoryStore`] keeps everything
//! in process and stands in for PostgreSQL in tests.

mod memory;
mod postgres;

use async_trait::async_trait;
use todo_core::error::CoreError;
use todo_core::types::DbId;

use crate::models::project::{CreateProject, Project, ProjectFilter, UpdateProject};
use crate::models::task::{CreateTask, Task, TaskFilter, UpdateTask};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Result type for every store operation.
pub type StoreResult<T> = Result<T, CoreError>;

/// Data access operations for projects and their tasks.
///
/// Keyed lookups fail with [`CoreError::NotFound`]. Task operations report
/// the project as missing when the project title does not resolve, and the
/// task otherwise. Writes fail with [`CoreError::Conflict`] on a duplicate
/// project title and [`CoreError::Persistence`] on any other storage error.
/// Lists are returned in insertion order.
///
/// # Thread Safety
/// Implementations must be `Send + Sync`; one instance is shared by all
/// in-flight requests.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Check that the backend is reachable.
    async fn health_check(&self) -> StoreResult<()>;

    // ==================== Projects ====================

    async fn list_projects(&self, filter: ProjectFilter) -> StoreResult<Vec<Project>>;

    async fn get_project(&self, title: &str) -> StoreResult<Project>;

    async fn create_project(&self, input: &CreateProject) -> StoreResult<Project>;

    /// Apply the non-`None` fields of `input`. Renaming onto an existing
    /// title is a conflict.
    async fn update_project(&self, title: &str, input: &UpdateProject) -> StoreResult<Project>;

    /// Hard-delete the project and all of its tasks, returning the project.
    async fn delete_project(&self, title: &str) -> StoreResult<Project>;

    async fn set_project_archived(&self, title: &str, archived: bool) -> StoreResult<Project>;

    // ==================== Tasks ====================

    async fn list_tasks(&self, project_title: &str, filter: TaskFilter) -> StoreResult<Vec<Task>>;

    async fn get_task(&self, project_title: &str, id: DbId) -> StoreResult<Task>;

    async fn create_task(&self, project_title: &str, input: &CreateTask) -> StoreResult<Task>;

    async fn update_task(
        &self,
        project_title: &str,
        id: DbId,
        input: &UpdateTask,
    ) -> StoreResult<Task>;

    async fn delete_task(&self, project_title: &str, id: DbId) -> StoreResult<Task>;

    async fn set_task_completed(
        &self,
        project_title: &str,
        id: DbId,
        completed: bool,
    ) -> StoreResult<Task>;
}

/// PostgreSQL SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL SQLSTATE for `check_violation`.
const CHECK_VIOLATION: &str = "23514";

/// Classify a sqlx error into the domain taxonomy.
///
/// - Unique constraint violations map to `Conflict`.
/// - Check constraint violations map to `Validation`.
/// - `RowNotFound` maps to `NotFound`.
/// - Everything else (including connection loss) maps to `Persistence`
///   carrying the driver message.
pub fn classify_sqlx_error(err: sqlx::Error) -> CoreError {
    if matches!(err, sqlx::Error::RowNotFound) {
        return CoreError::row_not_found();
    }
    if let sqlx::Error::Database(db_err) = &err {
        match db_err.code().as_deref() {
            Some(UNIQUE_VIOLATION) => {
                let constraint = db_err.constraint().unwrap_or("unknown");
                return CoreError::Conflict(format!(
                    "Duplicate value violates unique constraint: {constraint}"
                ));
            }
            Some(CHECK_VIOLATION) => {
                return CoreError::Validation(db_err.message().to_string());
            }
            _ => {}
        }
    }
    tracing::error!(error = %err, "Database error");
    CoreError::Persistence(err.to_string())
}
