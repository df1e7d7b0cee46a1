//! Request-path error taxonomy.
//!
//! Every handler failure is one of these four variants; all of them are
//! recovered here into the service's `{status, {"message": ...}}` pairs.
//! Nothing on the request path propagates further or crashes the process.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::tasks::validate::InvalidPayload;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Mutating payload missing a required field or wrongly typed.
    #[error("Invalid Payload")]
    InvalidPayload,
    /// Non-numeric id path token.
    #[error("Invalid task ID format")]
    InvalidIdFormat,
    /// Priority level outside {low, medium, high}.
    #[error("Invalid priority level")]
    InvalidPriorityLevel,
    /// Well-formed id with no matching record.
    #[error("Task not found")]
    NotFound,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidPayload
            | ApiError::InvalidIdFormat
            | ApiError::InvalidPriorityLevel => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl From<InvalidPayload> for ApiError {
    fn from(_: InvalidPayload) -> Self {
        ApiError::InvalidPayload
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "message": self.to_string() }));
        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::InvalidPayload.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::InvalidIdFormat.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::InvalidPriorityLevel.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_messages_match_wire_contract() {
        assert_eq!(ApiError::InvalidPayload.to_string(), "Invalid Payload");
        assert_eq!(
            ApiError::InvalidIdFormat.to_string(),
            "Invalid task ID format"
        );
        assert_eq!(
            ApiError::InvalidPriorityLevel.to_string(),
            "Invalid priority level"
        );
        assert_eq!(ApiError::NotFound.to_string(), "Task not found");
    }
}
