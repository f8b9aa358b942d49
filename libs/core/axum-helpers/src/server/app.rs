//! Router assembly and server startup.

use axum::{middleware, Router};
use core_config::server::ServerConfig;
use std::io;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{info, warn, Level};
use utoipa::OpenApi;

use crate::errors::handlers::not_found;
use crate::http::{cors_layer_from_env, security_headers};

/// Assemble the application router: documentation UIs, the API routes
/// merged at the root, a 404 fallback, and the shared middleware stack
/// (request tracing, security headers, CORS, compression).
///
/// CORS origins come from the required `CORS_ALLOWED_ORIGIN` environment
/// variable; see [`cors_layer_from_env`].
///
/// Health endpoints are the app's to add, via `health_router()` and its own
/// readiness router.
pub async fn create_router<D>(api: Router) -> io::Result<Router>
where
    D: OpenApi + 'static,
{
    use utoipa_rapidoc::RapiDoc;
    use utoipa_redoc::{Redoc, Servable as RedocServable};
    use utoipa_scalar::{Scalar, Servable as ScalarServable};
    use utoipa_swagger_ui::SwaggerUi;

    let cors = cors_layer_from_env()?;

    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", D::openapi()))
        .merge(Redoc::with_url("/redoc", D::openapi()))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
        .merge(Scalar::with_url("/scalar", D::openapi()))
        .merge(api)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(cors)
        .layer(CompressionLayer::new());

    Ok(router)
}

/// Bind and serve until SIGINT/SIGTERM, draining in-flight requests.
///
/// No cleanup hook; prefer [`create_production_app`] when resources need
/// closing on the way out.
pub async fn create_app(router: Router, config: &ServerConfig) -> io::Result<()> {
    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(super::shutdown_signal())
        .await
}

/// Bind and serve; once a shutdown signal arrives and in-flight requests
/// have drained, run `cleanup` bounded by `shutdown_timeout`.
///
/// ```ignore
/// create_production_app(app, &config.server, Duration::from_secs(30), async move {
///     close_postgres(db, "main").await;
/// })
/// .await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!("Listening on {}", listener.local_addr()?);

    let served = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(super::shutdown_signal())
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Server exited with an error"));

    info!(timeout = ?shutdown_timeout, "Server stopped, running cleanup");
    if tokio::time::timeout(shutdown_timeout, cleanup).await.is_err() {
        warn!(?shutdown_timeout, "Cleanup did not finish in time, exiting anyway");
    }

    served
}
