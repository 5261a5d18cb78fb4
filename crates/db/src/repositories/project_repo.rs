//! Repository for the `projects` table.

use sqlx::PgPool;

use crate::models::project::{CreateProject, Project, ProjectFilter, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, archived, created_at, updated_at";

/// Provides CRUD operations for projects, keyed by title.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (title, description)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its exact (case-sensitive) title.
    pub async fn find_by_title(pool: &PgPool, title: &str) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE title = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(title)
            .fetch_optional(pool)
            .await
    }

    /// Whether a project with this title exists.
    pub async fn exists(pool: &PgPool, title: &str) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as("SELECT EXISTS (SELECT 1 FROM projects WHERE title = $1)")
            .bind(title)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// List projects in insertion order, optionally filtered by `archived`.
    pub async fn list(pool: &PgPool, filter: ProjectFilter) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE ($1::BOOLEAN IS NULL OR archived = $1)
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(filter.archived)
            .fetch_all(pool)
            .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no project has the given title.
    pub async fn update(
        pool: &PgPool,
        title: &str,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                updated_at = NOW()
             WHERE title = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(title)
            .bind(&input.title)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Set or clear the archived flag. Returns `None` if no project matched.
    pub async fn set_archived(
        pool: &PgPool,
        title: &str,
        archived: bool,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET archived = $2, updated_at = NOW()
             WHERE title = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(title)
            .bind(archived)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a project; its tasks go with it (`ON DELETE CASCADE`).
    ///
    /// Returns the deleted row, or `None` if no project matched.
    pub async fn delete(pool: &PgPool, title: &str) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("DELETE FROM projects WHERE title = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Project>(&query)
            .bind(title)
            .fetch_optional(pool)
            .await
    }
}
