//! Handlers for the `/projects` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use todo_db::models::project::{CreateProject, Project, ProjectFilter, UpdateProject};

use crate::error::AppResult;
use crate::extract::{QueryParams, ValidJson};
use crate::state::AppState;

/// POST /projects
pub async fn create(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let project = state.store.create_project(&input).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /projects
pub async fn list(
    State(state): State<AppState>,
    QueryParams(filter): QueryParams<ProjectFilter>,
) -> AppResult<Json<Vec<Project>>> {
    let projects = state.store.list_projects(filter).await?;
    Ok(Json(projects))
}

/// GET /projects/{title}
pub async fn get_by_title(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> AppResult<Json<Project>> {
    let project = state.store.get_project(&title).await?;
    Ok(Json(project))
}

/// PUT /projects/{title}
pub async fn update(
    State(state): State<AppState>,
    Path(title): Path<String>,
    ValidJson(input): ValidJson<UpdateProject>,
) -> AppResult<Json<Project>> {
    let project = state.store.update_project(&title, &input).await?;
    Ok(Json(project))
}

/// DELETE /projects/{title}
///
/// Removes the project together with all of its tasks.
pub async fn delete(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> AppResult<Json<Project>> {
    let project = state.store.delete_project(&title).await?;
    Ok(Json(project))
}

/// PUT /projects/{title}/archive
pub async fn archive(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> AppResult<Json<Project>> {
    let project = state.store.set_project_archived(&title, true).await?;
    Ok(Json(project))
}

/// DELETE /projects/{title}/archive
pub async fn restore(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> AppResult<Json<Project>> {
    let project = state.store.set_project_archived(&title, false).await?;
    Ok(Json(project))
}
