// rest/routes/tasks.rs — Task CRUD routes.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::rest::error::ApiError;
use crate::tasks::validate::{validate, TaskFields};
use crate::tasks::{Priority, Task};
use crate::AppContext;

#[derive(Deserialize)]
pub struct ListQuery {
    completed: Option<String>,
}

impl ListQuery {
    /// `"true"`/`"false"` select a filter; anything else (or no flag at all)
    /// means unfiltered.
    fn completed_filter(&self) -> Option<bool> {
        match self.completed.as_deref() {
            Some("true") => Some(true),
            Some("false") => Some(false),
            _ => None,
        }
    }
}

/// GET /tasks — all tasks, optionally filtered on `completed`, newest first.
pub async fn list_tasks(
    State(ctx): State<Arc<AppContext>>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<Task>> {
    Json(ctx.store.list(query.completed_filter()).await)
}

/// GET /tasks/priority/{level} — tasks at one of the three known levels.
pub async fn tasks_by_priority(
    State(ctx): State<Arc<AppContext>>,
    Path(level): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let level: Priority = level
        .parse()
        .map_err(|_| ApiError::InvalidPriorityLevel)?;
    let tasks = ctx.store.by_priority(level).await;
    Ok(Json(json!({
        "message": format!("Tasks with {} priority retrieved successfully", level.as_str()),
        "tasks": tasks,
    })))
}

/// GET /tasks/{id}.
pub async fn get_task(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
) -> Result<Json<Task>, ApiError> {
    let id = parse_id(&id)?;
    let task = ctx.store.get(id).await.ok_or(ApiError::NotFound)?;
    Ok(Json(task))
}

/// POST /tasks — create a task; the store assigns the id.
pub async fn create_task(
    State(ctx): State<Arc<AppContext>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let fields = validated_body(body)?;
    let task = ctx.store.create(fields).await;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Task created successfully",
            "task": task,
        })),
    ))
}

/// PUT /tasks/{id} — overwrite title/description/completed.
///
/// Payload shape is checked before the existence lookup: a malformed body
/// against a nonexistent id is 400, not 404.
pub async fn update_task(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let fields = validated_body(body)?;
    let id = parse_id(&id)?;
    let task = ctx.store.update(id, fields).await.ok_or(ApiError::NotFound)?;
    Ok(Json(json!({
        "message": "Task updated successfully",
        "task": task,
    })))
}

/// DELETE /tasks/{id}.
pub async fn delete_task(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;
    if !ctx.store.delete(id).await {
        return Err(ApiError::NotFound);
    }
    Ok(Json(json!({ "message": "Task deleted successfully" })))
}

/// The id path token is extracted raw and parsed here so a non-numeric token
/// yields the service's own 400 body rather than an extractor rejection.
fn parse_id(raw: &str) -> Result<u64, ApiError> {
    raw.parse().map_err(|_| ApiError::InvalidIdFormat)
}

fn validated_body(body: Result<Json<Value>, JsonRejection>) -> Result<TaskFields, ApiError> {
    // A body that isn't JSON at all fails the same way as a wrongly-shaped one.
    let Json(payload) = body.map_err(|_| ApiError::InvalidPayload)?;
    Ok(validate(&payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("7"), Ok(7));
        assert_eq!(parse_id("abc"), Err(ApiError::InvalidIdFormat));
        assert_eq!(parse_id("1.5"), Err(ApiError::InvalidIdFormat));
        assert_eq!(parse_id("-1"), Err(ApiError::InvalidIdFormat));
    }

    #[test]
    fn test_completed_filter() {
        let q = |s: Option<&str>| ListQuery {
            completed: s.map(str::to_string),
        };
        assert_eq!(q(Some("true")).completed_filter(), Some(true));
        assert_eq!(q(Some("false")).completed_filter(), Some(false));
        assert_eq!(q(Some("banana")).completed_filter(), None);
        assert_eq!(q(None).completed_filter(), None);
    }
}
