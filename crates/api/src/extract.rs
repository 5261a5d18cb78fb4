//! Request extractors shared by the handlers.

use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use todo_core::error::CoreError;
use todo_core::types::DbId;
use validator::Validate;

use crate::error::AppError;

/// JSON body that is deserialized and then validated.
///
/// Any body rejection (malformed JSON, missing field, wrong content type)
/// becomes a 400 with the parser's message; failed field validation becomes
/// a 400 `Validation` error.
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        value
            .validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;
        Ok(Self(value))
    }
}

/// Query string parameters; a malformed query is a 400 JSON error.
pub struct QueryParams<T>(pub T);

impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Path parameters of `/projects/{title}/tasks/{id}[/...]`.
///
/// `{id}` only matches ASCII digits; anything else is answered with a bare
/// 404, the same as a path no route matches.
#[derive(Debug)]
pub struct TaskPath {
    pub title: String,
    pub id: DbId,
}

impl<S> FromRequestParts<S> for TaskPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path((title, raw_id)) = Path::<(String, String)>::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;
        let id = parse_task_id(&raw_id).ok_or_else(|| StatusCode::NOT_FOUND.into_response())?;
        Ok(Self { title, id })
    }
}

/// Accept only non-empty ASCII digit strings that fit a [`DbId`].
pub fn parse_task_id(raw: &str) -> Option<DbId> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}
