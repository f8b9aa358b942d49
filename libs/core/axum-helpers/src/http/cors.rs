//! CORS configuration.

use axum::http::{header, HeaderValue, Method};
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Build the CORS layer from `CORS_ALLOWED_ORIGIN` (comma-separated
/// origins).
///
/// The variable is required; failing fast beats silently serving with an
/// origin list nobody configured.
pub fn cors_layer_from_env() -> io::Result<CorsLayer> {
    let raw = std::env::var("CORS_ALLOWED_ORIGIN").map_err(|_| {
        invalid_input(
            "CORS_ALLOWED_ORIGIN must be set, \
             e.g. CORS_ALLOWED_ORIGIN=http://localhost:3000,https://example.com",
        )
    })?;

    let origins = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<HeaderValue>()
                .map_err(|e| invalid_input(format!("bad origin '{}' in CORS_ALLOWED_ORIGIN: {}", s, e)))
        })
        .collect::<io::Result<Vec<_>>>()?;

    if origins.is_empty() {
        return Err(invalid_input("CORS_ALLOWED_ORIGIN contains no origins"));
    }

    tracing::info!(origins = %raw, "CORS configured");
    Ok(cors_layer(AllowOrigin::list(origins)))
}

/// CORS layer with the API's standard methods, headers, and cache time.
pub fn cors_layer(origins: impl Into<AllowOrigin>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}

fn invalid_input(message: impl Into<String>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, message.into())
}
