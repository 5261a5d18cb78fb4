//! Repository for the `tasks` table.
//!
//! Tasks are always addressed through their project's title. Every query
//! joins `projects` so the title lookup and the task operation run as one
//! statement.

use sqlx::PgPool;
use todo_core::types::DbId;

use crate::models::task::{CreateTask, Task, TaskFilter, UpdateTask};

/// Column list, qualified with the `t` alias used by every query.
const COLUMNS: &str = "t.id, t.project_id, t.title, t.priority, t.deadline, t.completed, \
                       t.created_at, t.updated_at";

/// Provides CRUD operations for tasks scoped under a project.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a task under the project with `project_title`.
    ///
    /// Returns `None` if the project does not exist.
    pub async fn create(
        pool: &PgPool,
        project_title: &str,
        input: &CreateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks AS t (project_id, title, priority, deadline, completed)
             SELECT p.id, $2, COALESCE($3, 0), $4, COALESCE($5, FALSE)
             FROM projects p
             WHERE p.title = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(project_title)
            .bind(&input.title)
            .bind(input.priority)
            .bind(input.deadline)
            .bind(input.completed)
            .fetch_optional(pool)
            .await
    }

    /// Find a task by id within the named project.
    pub async fn find(
        pool: &PgPool,
        project_title: &str,
        id: DbId,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks t
             JOIN projects p ON p.id = t.project_id
             WHERE p.title = $1 AND t.id = $2"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(project_title)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the project's tasks in insertion order, optionally filtered by
    /// `completed`. An unknown project yields an empty list.
    pub async fn list_by_project(
        pool: &PgPool,
        project_title: &str,
        filter: TaskFilter,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks t
             JOIN projects p ON p.id = t.project_id
             WHERE p.title = $1 AND ($2::BOOLEAN IS NULL OR t.completed = $2)
             ORDER BY t.id ASC"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(project_title)
            .bind(filter.completed)
            .fetch_all(pool)
            .await
    }

    /// Update a task. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        project_title: &str,
        id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks t SET
                title = COALESCE($3, t.title),
                priority = COALESCE($4, t.priority),
                deadline = COALESCE($5, t.deadline),
                completed = COALESCE($6, t.completed),
                updated_at = NOW()
             FROM projects p
             WHERE p.id = t.project_id AND p.title = $1 AND t.id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(project_title)
            .bind(id)
            .bind(&input.title)
            .bind(input.priority)
            .bind(input.deadline)
            .bind(input.completed)
            .fetch_optional(pool)
            .await
    }

    /// Set or clear the completed flag.
    pub async fn set_completed(
        pool: &PgPool,
        project_title: &str,
        id: DbId,
        completed: bool,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks t SET completed = $3, updated_at = NOW()
             FROM projects p
             WHERE p.id = t.project_id AND p.title = $1 AND t.id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(project_title)
            .bind(id)
            .bind(completed)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a task, returning the removed row.
    pub async fn delete(
        pool: &PgPool,
        project_title: &str,
        id: DbId,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "DELETE FROM tasks t
             USING projects p
             WHERE p.id = t.project_id AND p.title = $1 AND t.id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(project_title)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
