//! Liveness and readiness plumbing.
//!
//! `/health` is static liveness (the process is up); readiness probes real
//! dependencies and belongs to the app, which knows what it depends on.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use core_config::AppInfo;
use futures::future::join_all;
use serde::Serialize;
use serde_json::{json, Value};
use std::future::Future;
use std::pin::Pin;

/// Body of the `/health` liveness endpoint.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub name: &'static str,
    pub version: &'static str,
}

/// One named dependency probe for a readiness endpoint.
pub type HealthCheckFuture<'a> = Pin<Box<dyn Future<Output = Result<(), String>> + Send + 'a>>;

/// Probe every dependency concurrently and report per-dependency status.
///
/// 200 when everything answered, 503 otherwise. The body names each
/// dependency as "connected" or "disconnected" next to an overall
/// `status` field:
///
/// ```json
/// { "status": "ready", "database": "connected" }
/// ```
pub async fn run_health_checks(
    checks: Vec<(&str, HealthCheckFuture<'_>)>,
) -> (StatusCode, Json<Value>) {
    let (names, probes): (Vec<_>, Vec<_>) = checks.into_iter().unzip();
    let outcomes = join_all(probes).await;

    let mut body = serde_json::Map::new();
    let mut ready = true;

    for (name, outcome) in names.into_iter().zip(outcomes) {
        match outcome {
            Ok(()) => {
                body.insert(name.to_string(), json!("connected"));
            }
            Err(reason) => {
                tracing::error!(dependency = name, %reason, "Readiness probe failed");
                body.insert(name.to_string(), json!("disconnected"));
                ready = false;
            }
        }
    }

    body.insert(
        "status".to_string(),
        json!(if ready { "ready" } else { "not ready" }),
    );

    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(Value::Object(body)))
}

/// `/health` handler: always 200 while the process is serving.
pub async fn health_handler(State(app): State<AppInfo>) -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy",
            name: app.name,
            version: app.version,
        }),
    )
}

/// Router exposing `/health` with the app's name and version.
pub fn health_router(app_info: AppInfo) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(app_info)
}
