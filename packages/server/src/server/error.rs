//! Mapping of domain errors onto HTTP responses.
//!
//! Every error body has the shape `{"detail": "<message>"}`.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use crate::domains::notes::NoteError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}

impl From<NoteError> for ApiError {
    fn from(err: NoteError) -> Self {
        match err {
            NoteError::NotFound(detail) | NoteError::PreconditionFailed(detail) => {
                Self::new(StatusCode::NOT_FOUND, detail)
            }
            NoteError::Validation(detail) => Self::new(StatusCode::UNPROCESSABLE_ENTITY, detail),
            NoteError::Store(e) => {
                error!(error = ?e, "Note store operation failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        }
    }
}

/// Malformed bodies keep axum's status (422 for bad data, 415 for a missing
/// content type) and its message, which names the offending field.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}
