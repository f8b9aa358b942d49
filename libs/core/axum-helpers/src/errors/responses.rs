//! Reusable OpenAPI error responses, referenced from endpoint docs.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

/// Canonical messages reused across handlers and extractors.
pub mod messages {
    pub const INTERNAL_ERROR: &str = "An internal server error occurred";
    pub const VALIDATION_FAILED: &str = "Request validation failed";
}

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "error": "InternalServerError",
        "message": "An internal server error occurred"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Unprocessable Entity - validation failed",
    content_type = "application/json",
    example = json!({
        "error": "UnprocessableEntity",
        "message": "Request validation failed",
        "details": {
            "number_phone": [{
                "code": "length",
                "message": null,
                "params": {"equal": 10, "value": "12345"}
            }]
        }
    })
)]
pub struct UnprocessableEntityResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - malformed UUID path parameter",
    content_type = "application/json",
    example = json!({
        "error": "BadRequest",
        "message": "'42' is not a valid UUID"
    })
)]
pub struct BadRequestUuidResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Not Found",
    content_type = "application/json",
    example = json!({
        "error": "NotFound",
        "message": "User 0198b2c0-0000-7000-8000-000000000000 not found"
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);
