use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_helpers::errors::{responses::messages, ErrorResponse};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(Uuid),

    #[error("User with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            UserError::NotFound(id) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new("NotFound", format!("User {} not found", id)),
            ),
            UserError::DuplicateEmail(email) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse::new(
                    "UnprocessableEntity",
                    format!("User with email '{}' already exists", email),
                )
                .with_details(json!({
                    "email": [{ "code": "unique", "message": "has already been taken" }]
                })),
            ),
            UserError::Validation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse::new("UnprocessableEntity", msg.clone()),
            ),
            UserError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("InternalServerError", messages::INTERNAL_ERROR),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let resp = UserError::NotFound(Uuid::nil()).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_duplicate_email_maps_to_422() {
        let resp = UserError::DuplicateEmail("a@b.com".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_internal_hides_details() {
        let resp = UserError::Internal("connection refused".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
