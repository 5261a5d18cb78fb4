//! In-memory [`TodoStore`] implementation.
//!
//! Mirrors the PostgreSQL semantics (unique titles, cascade delete,
//! insertion-ordered lists, sequential ids) so handlers can be exercised
//! without a database server.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;
use todo_core::error::CoreError;
use todo_core::types::DbId;

use super::{StoreResult, TodoStore};
use crate::models::project::{CreateProject, Project, ProjectFilter, UpdateProject};
use crate::models::task::{CreateTask, Task, TaskFilter, UpdateTask};

/// Process-local store. Clones share the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    data: Arc<RwLock<MemoryData>>,
}

#[derive(Default)]
struct MemoryData {
    projects: Vec<Project>,
    tasks: Vec<Task>,
    last_project_id: DbId,
    last_task_id: DbId,
    unhealthy: bool,
}

impl MemoryData {
    fn project_index(&self, title: &str) -> StoreResult<usize> {
        self.projects
            .iter()
            .position(|p| p.title == title)
            .ok_or_else(|| CoreError::project_not_found(title))
    }

    fn project_id(&self, title: &str) -> StoreResult<DbId> {
        self.project_index(title).map(|i| self.projects[i].id)
    }

    fn task_index(&self, project_title: &str, id: DbId) -> StoreResult<usize> {
        let project_id = self.project_id(project_title)?;
        self.tasks
            .iter()
            .position(|t| t.id == id && t.project_id == project_id)
            .ok_or_else(|| CoreError::task_not_found(id))
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make [`TodoStore::health_check`] fail, simulating a lost connection.
    pub fn set_healthy(&self, healthy: bool) -> StoreResult<()> {
        self.write()?.unhealthy = !healthy;
        Ok(())
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, MemoryData>> {
        self.data
            .read()
            .map_err(|_| CoreError::Persistence("in-memory store lock poisoned".into()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, MemoryData>> {
        self.data
            .write()
            .map_err(|_| CoreError::Persistence("in-memory store lock poisoned".into()))
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn health_check(&self) -> StoreResult<()> {
        if self.read()?.unhealthy {
            return Err(CoreError::Persistence("store marked unhealthy".into()));
        }
        Ok(())
    }

    async fn list_projects(&self, filter: ProjectFilter) -> StoreResult<Vec<Project>> {
        let data = self.read()?;
        Ok(data
            .projects
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect())
    }

    async fn get_project(&self, title: &str) -> StoreResult<Project> {
        let data = self.read()?;
        let index = data.project_index(title)?;
        Ok(data.projects[index].clone())
    }

    async fn create_project(&self, input: &CreateProject) -> StoreResult<Project> {
        let mut data = self.write()?;
        if data.projects.iter().any(|p| p.title == input.title) {
            return Err(CoreError::duplicate_title(&input.title));
        }

        data.last_project_id += 1;
        let now = Utc::now();
        let project = Project {
            id: data.last_project_id,
            title: input.title.clone(),
            description: input.description.clone(),
            archived: false,
            created_at: now,
            updated_at: now,
        };
        data.projects.push(project.clone());
        Ok(project)
    }

    async fn update_project(&self, title: &str, input: &UpdateProject) -> StoreResult<Project> {
        let mut data = self.write()?;
        let index = data.project_index(title)?;

        if let Some(new_title) = &input.title {
            let taken = data
                .projects
                .iter()
                .enumerate()
                .any(|(i, p)| i != index && &p.title == new_title);
            if taken {
                return Err(CoreError::duplicate_title(new_title));
            }
        }

        let project = &mut data.projects[index];
        if let Some(new_title) = &input.title {
            project.title = new_title.clone();
        }
        if let Some(description) = &input.description {
            project.description = Some(description.clone());
        }
        project.updated_at = Utc::now();
        Ok(project.clone())
    }

    async fn delete_project(&self, title: &str) -> StoreResult<Project> {
        let mut data = self.write()?;
        let index = data.project_index(title)?;
        let project = data.projects.remove(index);
        data.tasks.retain(|t| t.project_id != project.id);
        Ok(project)
    }

    async fn set_project_archived(&self, title: &str, archived: bool) -> StoreResult<Project> {
        let mut data = self.write()?;
        let index = data.project_index(title)?;
        let project = &mut data.projects[index];
        project.archived = archived;
        project.updated_at = Utc::now();
        Ok(project.clone())
    }

    async fn list_tasks(&self, project_title: &str, filter: TaskFilter) -> StoreResult<Vec<Task>> {
        let data = self.read()?;
        let project_id = data.project_id(project_title)?;
        Ok(data
            .tasks
            .iter()
            .filter(|t| t.project_id == project_id && filter.matches(t))
            .cloned()
            .collect())
    }

    async fn get_task(&self, project_title: &str, id: DbId) -> StoreResult<Task> {
        let data = self.read()?;
        let index = data.task_index(project_title, id)?;
        Ok(data.tasks[index].clone())
    }

    async fn create_task(&self, project_title: &str, input: &CreateTask) -> StoreResult<Task> {
        let mut data = self.write()?;
        let project_id = data.project_id(project_title)?;

        data.last_task_id += 1;
        let now = Utc::now();
        let task = Task {
            id: data.last_task_id,
            project_id,
            title: input.title.clone(),
            priority: input.priority.unwrap_or(0),
            deadline: input.deadline,
            completed: input.completed.unwrap_or(false),
            created_at: now,
            updated_at: now,
        };
        data.tasks.push(task.clone());
        Ok(task)
    }

    async fn update_task(
        &self,
        project_title: &str,
        id: DbId,
        input: &UpdateTask,
    ) -> StoreResult<Task> {
        let mut data = self.write()?;
        let index = data.task_index(project_title, id)?;
        let task = &mut data.tasks[index];
        if let Some(title) = &input.title {
            task.title = title.clone();
        }
        if let Some(priority) = input.priority {
            task.priority = priority;
        }
        if let Some(deadline) = input.deadline {
            task.deadline = Some(deadline);
        }
        if let Some(completed) = input.completed {
            task.completed = completed;
        }
        task.updated_at = Utc::now();
        Ok(task.clone())
    }

    async fn delete_task(&self, project_title: &str, id: DbId) -> StoreResult<Task> {
        let mut data = self.write()?;
        let index = data.task_index(project_title, id)?;
        Ok(data.tasks.remove(index))
    }

    async fn set_task_completed(
        &self,
        project_title: &str,
        id: DbId,
        completed: bool,
    ) -> StoreResult<Task> {
        let mut data = self.write()?;
        let index = data.task_index(project_title, id)?;
        let task = &mut data.tasks[index];
        task.completed = completed;
        task.updated_at = Utc::now();
        Ok(task.clone())
    }
}
