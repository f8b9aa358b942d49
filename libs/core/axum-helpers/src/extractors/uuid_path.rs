//! UUID path-parameter extractor.

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::errors::AppError;

/// Parse the single path parameter as a UUID, answering 400 when it is not
/// one.
///
/// ```ignore
/// async fn edit(UuidPath(id): UuidPath) { /* … */ }
/// ```
pub struct UuidPath(pub Uuid);

impl<S> FromRequestParts<S> for UuidPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        Uuid::parse_str(&raw).map(UuidPath).map_err(|_| {
            AppError::BadRequest(format!("'{}' is not a valid UUID", raw)).into_response()
        })
    }
}
