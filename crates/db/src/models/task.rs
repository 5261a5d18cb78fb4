//! Task entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use todo_core::types::{DbId, Timestamp};
use validator::{Validate, ValidationError};

/// A task row from the `tasks` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub project_id: DbId,
    pub title: String,
    /// 0 (lowest, default) to 3.
    pub priority: i16,
    pub deadline: Option<Timestamp>,
    pub completed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a task under a project.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTask {
    #[validate(
        length(max = 255),
        custom(function = "todo_core::validation::not_blank")
    )]
    pub title: String,
    /// Defaults to 0 if omitted.
    #[validate(range(min = 0, max = 3))]
    pub priority: Option<i16>,
    pub deadline: Option<Timestamp>,
    /// Defaults to `false` if omitted.
    pub completed: Option<bool>,
}

/// DTO for updating an existing task. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[validate(schema(function = "validate_update_title"))]
pub struct UpdateTask {
    #[validate(length(max = 255))]
    pub title: Option<String>,
    #[validate(range(min = 0, max = 3))]
    pub priority: Option<i16>,
    pub deadline: Option<Timestamp>,
    pub completed: Option<bool>,
}

fn validate_update_title(input: &UpdateTask) -> Result<(), ValidationError> {
    input
        .title
        .as_deref()
        .map_or(Ok(()), todo_core::validation::not_blank)
}

/// Optional `?completed=` filter for task listings.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct TaskFilter {
    pub completed: Option<bool>,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        self.completed.is_none_or(|completed| task.completed == completed)
    }
}
