//! PostgreSQL-backed [`TodoStore`].

use async_trait::async_trait;
use todo_core::error::CoreError;
use todo_core::types::DbId;

use super::{classify_sqlx_error, StoreResult, TodoStore};
use crate::models::project::{CreateProject, Project, ProjectFilter, UpdateProject};
use crate::models::task::{CreateTask, Task, TaskFilter, UpdateTask};
use crate::repositories::{ProjectRepo, TaskRepo};
use crate::DbPool;

/// Store backed by a shared connection pool. Cheap to clone.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Resolve a task miss into the right `NotFound`: the project when its
    /// title does not exist, the task otherwise.
    async fn task_missing(&self, project_title: &str, id: DbId) -> CoreError {
        match ProjectRepo::exists(&self.pool, project_title).await {
            Ok(true) => CoreError::task_not_found(id),
            Ok(false) => CoreError::project_not_found(project_title),
            Err(e) => classify_sqlx_error(e),
        }
    }

    async fn task_or_missing(
        &self,
        project_title: &str,
        id: DbId,
        row: Result<Option<Task>, sqlx::Error>,
    ) -> StoreResult<Task> {
        match row.map_err(classify_sqlx_error)? {
            Some(task) => Ok(task),
            None => Err(self.task_missing(project_title, id).await),
        }
    }
}

/// Replace the generic unique-violation message with one naming the title.
fn title_conflict(title: &str) -> impl FnOnce(sqlx::Error) -> CoreError + '_ {
    move |err| match classify_sqlx_error(err) {
        CoreError::Conflict(_) => CoreError::duplicate_title(title),
        other => other,
    }
}

#[async_trait]
impl TodoStore for PgStore {
    async fn health_check(&self) -> StoreResult<()> {
        crate::health_check(&self.pool)
            .await
            .map_err(classify_sqlx_error)
    }

    async fn list_projects(&self, filter: ProjectFilter) -> StoreResult<Vec<Project>> {
        ProjectRepo::list(&self.pool, filter)
            .await
            .map_err(classify_sqlx_error)
    }

    async fn get_project(&self, title: &str) -> StoreResult<Project> {
        ProjectRepo::find_by_title(&self.pool, title)
            .await
            .map_err(classify_sqlx_error)?
            .ok_or_else(|| CoreError::project_not_found(title))
    }

    async fn create_project(&self, input: &CreateProject) -> StoreResult<Project> {
        let project = ProjectRepo::create(&self.pool, input)
            .await
            .map_err(title_conflict(&input.title))?;
        tracing::info!(project_id = project.id, title = %project.title, "Project created");
        Ok(project)
    }

    async fn update_project(&self, title: &str, input: &UpdateProject) -> StoreResult<Project> {
        let new_title = input.title.as_deref().unwrap_or(title);
        ProjectRepo::update(&self.pool, title, input)
            .await
            .map_err(title_conflict(new_title))?
            .ok_or_else(|| CoreError::project_not_found(title))
    }

    async fn delete_project(&self, title: &str) -> StoreResult<Project> {
        let project = ProjectRepo::delete(&self.pool, title)
            .await
            .map_err(classify_sqlx_error)?
            .ok_or_else(|| CoreError::project_not_found(title))?;
        tracing::info!(project_id = project.id, title, "Project deleted with its tasks");
        Ok(project)
    }

    async fn set_project_archived(&self, title: &str, archived: bool) -> StoreResult<Project> {
        ProjectRepo::set_archived(&self.pool, title, archived)
            .await
            .map_err(classify_sqlx_error)?
            .ok_or_else(|| CoreError::project_not_found(title))
    }

    async fn list_tasks(&self, project_title: &str, filter: TaskFilter) -> StoreResult<Vec<Task>> {
        if !ProjectRepo::exists(&self.pool, project_title)
            .await
            .map_err(classify_sqlx_error)?
        {
            return Err(CoreError::project_not_found(project_title));
        }
        TaskRepo::list_by_project(&self.pool, project_title, filter)
            .await
            .map_err(classify_sqlx_error)
    }

    async fn get_task(&self, project_title: &str, id: DbId) -> StoreResult<Task> {
        let row = TaskRepo::find(&self.pool, project_title, id).await;
        self.task_or_missing(project_title, id, row).await
    }

    async fn create_task(&self, project_title: &str, input: &CreateTask) -> StoreResult<Task> {
        TaskRepo::create(&self.pool, project_title, input)
            .await
            .map_err(classify_sqlx_error)?
            .ok_or_else(|| CoreError::project_not_found(project_title))
    }

    async fn update_task(
        &self,
        project_title: &str,
        id: DbId,
        input: &UpdateTask,
    ) -> StoreResult<Task> {
        let row = TaskRepo::update(&self.pool, project_title, id, input).await;
        self.task_or_missing(project_title, id, row).await
    }

    async fn delete_task(&self, project_title: &str, id: DbId) -> StoreResult<Task> {
        let row = TaskRepo::delete(&self.pool, project_title, id).await;
        self.task_or_missing(project_title, id, row).await
    }

    async fn set_task_completed(
        &self,
        project_title: &str,
        id: DbId,
        completed: bool,
    ) -> StoreResult<Task> {
        let row = TaskRepo::set_completed(&self.pool, project_title, id, completed).await;
        self.task_or_missing(project_title, id, row).await
    }
}
