//! JSON body extractor that runs `validator` rules before the handler
//! sees the payload.

use axum::{
    extract::{FromRequest, Json, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use validator::{Validate, ValidationErrors};

use crate::errors::{responses::messages, ErrorResponse};

/// Deserialize the JSON body and validate it in one step.
///
/// A malformed body is rejected the way `axum::Json` rejects it; a body
/// that deserializes but breaks a validation rule gets a 422 whose
/// `details` object has one entry per offending field.
///
/// ```ignore
/// async fn store(ValidatedJson(input): ValidatedJson<CreateUser>) { /* … */ }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        match payload.validate() {
            Ok(()) => Ok(ValidatedJson(payload)),
            Err(errors) => Err(validation_failure(errors)),
        }
    }
}

fn validation_failure(errors: ValidationErrors) -> Response {
    let mut fields = serde_json::Map::new();
    for (field, field_errors) in errors.field_errors() {
        let entries: Vec<Value> = field_errors
            .iter()
            .map(|e| {
                json!({
                    "code": e.code,
                    "message": e.message,
                    "params": e.params,
                })
            })
            .collect();
        fields.insert(field.to_string(), Value::Array(entries));
    }

    let body = ErrorResponse::new("UnprocessableEntity", messages::VALIDATION_FAILED)
        .with_details(Value::Object(fields));

    (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(body)).into_response()
}
