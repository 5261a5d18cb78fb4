//! Project entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use todo_core::types::{DbId, Timestamp};
use validator::{Validate, ValidationError};

/// A project row from the `projects` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub archived: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProject {
    #[validate(
        length(max = 255),
        custom(function = "todo_core::validation::path_segment")
    )]
    pub title: String,
    pub description: Option<String>,
}

/// DTO for updating an existing project. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[validate(schema(function = "validate_update_title"))]
pub struct UpdateProject {
    #[validate(length(max = 255))]
    pub title: Option<String>,
    pub description: Option<String>,
}

fn validate_update_title(input: &UpdateProject) -> Result<(), ValidationError> {
    input
        .title
        .as_deref()
        .map_or(Ok(()), todo_core::validation::path_segment)
}

/// Optional `?archived=` filter for project listings.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ProjectFilter {
    pub archived: Option<bool>,
}

impl ProjectFilter {
    pub fn matches(&self, project: &Project) -> bool {
        self.archived.is_none_or(|archived| project.archived == archived)
    }
}
