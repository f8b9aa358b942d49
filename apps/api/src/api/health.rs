//! Readiness handler backed by a real database ping.

use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};
use axum_helpers::server::{run_health_checks, HealthCheckFuture};

/// `/ready` handler: 200 only while every dependency answers.
pub async fn ready_handler(State(state): State<AppState>) -> impl IntoResponse {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "database",
        Box::pin(async {
            database::postgres::ping(&state.db)
                .await
                .map_err(|e| e.to_string())
        }),
    )];

    run_health_checks(checks).await
}
