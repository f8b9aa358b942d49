//! Shared building blocks for the workspace's Axum services.
//!
//! - [`server`]: router assembly with OpenAPI docs UIs, startup with
//!   graceful shutdown, health plumbing, pool cleanup
//! - [`http`]: CORS and security-header middleware
//! - [`errors`]: the structured JSON error body and plumbing errors
//! - [`extractors`]: `ValidatedJson` and `UuidPath`
//!
//! ```ignore
//! let router = axum_helpers::create_router::<ApiDoc>(api_routes).await?;
//! let app = router.merge(health_router(app_info!()));
//! create_production_app(app, &config, Duration::from_secs(30), cleanup).await?;
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    create_app, create_production_app, create_router, health_router, run_health_checks,
    shutdown_signal, HealthCheckFuture, HealthResponse,
};

pub use http::{cors_layer, cors_layer_from_env, security_headers};

pub use errors::{AppError, ErrorResponse};

pub use extractors::{UuidPath, ValidatedJson};
