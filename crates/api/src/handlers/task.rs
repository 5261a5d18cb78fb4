//! Handlers for tasks nested under `/projects/{title}/tasks`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use todo_db::models::task::{CreateTask, Task, TaskFilter, UpdateTask};

use crate::error::AppResult;
use crate::extract::{QueryParams, TaskPath, ValidJson};
use crate::state::AppState;

/// GET /projects/{title}/tasks
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(title): Path<String>,
    QueryParams(filter): QueryParams<TaskFilter>,
) -> AppResult<Json<Vec<Task>>> {
    let tasks = state.store.list_tasks(&title, filter).await?;
    Ok(Json(tasks))
}

/// POST /projects/{title}/tasks
pub async fn create(
    State(state): State<AppState>,
    Path(title): Path<String>,
    ValidJson(input): ValidJson<CreateTask>,
) -> AppResult<(StatusCode, Json<Task>)> {
    let task = state.store.create_task(&title, &input).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /projects/{title}/tasks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    TaskPath { title, id }: TaskPath,
) -> AppResult<Json<Task>> {
    let task = state.store.get_task(&title, id).await?;
    Ok(Json(task))
}

/// PUT /projects/{title}/tasks/{id}
pub async fn update(
    State(state): State<AppState>,
    TaskPath { title, id }: TaskPath,
    ValidJson(input): ValidJson<UpdateTask>,
) -> AppResult<Json<Task>> {
    let task = state.store.update_task(&title, id, &input).await?;
    Ok(Json(task))
}

/// DELETE /projects/{title}/tasks/{id}
pub async fn delete(
    State(state): State<AppState>,
    TaskPath { title, id }: TaskPath,
) -> AppResult<Json<Task>> {
    let task = state.store.delete_task(&title, id).await?;
    Ok(Json(task))
}

/// PUT /projects/{title}/tasks/{id}/complete
pub async fn complete(
    State(state): State<AppState>,
    TaskPath { title, id }: TaskPath,
) -> AppResult<Json<Task>> {
    let task = state.store.set_task_completed(&title, id, true).await?;
    Ok(Json(task))
}

/// DELETE /projects/{title}/tasks/{id}/complete
pub async fn undo(
    State(state): State<AppState>,
    TaskPath { title, id }: TaskPath,
) -> AppResult<Json<Task>> {
    let task = state.store.set_task_completed(&title, id, false).await?;
    Ok(Json(task))
}
