//! Structured JSON error bodies shared by every endpoint.

pub mod handlers;
pub mod responses;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Wire format of every error this API returns.
///
/// `error` is a machine-readable kind ("NotFound", "UnprocessableEntity"),
/// `message` is for humans, and `details` carries field-level validation
/// errors when there are any:
///
/// ```json
/// {
///   "error": "UnprocessableEntity",
///   "message": "Request validation failed",
///   "details": { "email": [{ "code": "email" }] }
/// }
/// ```
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Error type for the shared HTTP plumbing (extractors, router fallbacks).
///
/// Domain crates define their own richer error enums; this one only covers
/// the layer beneath them.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind) = match &self {
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BadRequest"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NotFound"),
        };

        (status, Json(ErrorResponse::new(kind, self.to_string()))).into_response()
    }
}
