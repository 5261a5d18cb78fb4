/// Domain-level error shared by every storage backend.
///
/// The HTTP layer maps each variant onto a status code; storage backends
/// never produce HTTP concepts directly.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// No row matches the lookup key (`key` is the title or task id).
    #[error("{entity} '{key}' not found")]
    NotFound { entity: &'static str, key: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// A uniqueness constraint was violated.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Any other storage failure, including connection loss.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl CoreError {
    /// Shorthand for a missing project, keyed by title.
    pub fn project_not_found(title: &str) -> Self {
        Self::NotFound {
            entity: "Project",
            key: title.to_string(),
        }
    }

    /// Shorthand for a missing task, keyed by id.
    pub fn task_not_found(id: crate::types::DbId) -> Self {
        Self::NotFound {
            entity: "Task",
            key: id.to_string(),
        }
    }

    /// A query that expected a row got none, with no lookup key at hand.
    pub fn row_not_found() -> Self {
        Self::NotFound {
            entity: "Row",
            key: "requested".to_string(),
        }
    }

    /// Conflict raised when a project title is already taken.
    pub fn duplicate_title(title: &str) -> Self {
        Self::Conflict(format!("A project titled '{title}' already exists"))
    }
}
