//! Payload validation for mutating operations.
//!
//! A payload is well-formed iff it carries `title` as a string, `description`
//! as a string and `completed` as a boolean — exact JSON types, no coercion
//! (`"true"` is not a boolean). Applied identically before create and update.

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("payload is missing a required field or a field has the wrong type")]
pub struct InvalidPayload;

/// The validated portion of a task payload: the three required fields plus
/// the remaining attribute bag.
#[derive(Debug, Clone)]
pub struct TaskFields {
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub extra: Map<String, Value>,
}

/// Check a raw payload and split it into [`TaskFields`].
///
/// Unknown fields pass through into `extra`; an `id` field in the payload is
/// dropped (ids are store-assigned, never client-supplied).
pub fn validate(payload: &Value) -> Result<TaskFields, InvalidPayload> {
    let obj = payload.as_object().ok_or(InvalidPayload)?;

    let title = obj
        .get("title")
        .and_then(Value::as_str)
        .ok_or(InvalidPayload)?;
    let description = obj
        .get("description")
        .and_then(Value::as_str)
        .ok_or(InvalidPayload)?;
    let completed = obj
        .get("completed")
        .and_then(Value::as_bool)
        .ok_or(InvalidPayload)?;

    let mut extra = obj.clone();
    extra.remove("id");
    extra.remove("title");
    extra.remove("description");
    extra.remove("completed");

    Ok(TaskFields {
        title: title.to_string(),
        description: description.to_string(),
        completed,
        extra,
    })
}
