use axum::Router;

pub mod health;
pub mod users;

/// Creates the API routes.
///
/// This function takes a reference to AppState and initializes all services.
/// Returns a stateless Router (all sub-routers have state already applied),
/// so only cheap Arc pointer clones remain when domains extract the database
/// connection.
///
/// Routes are merged at the router root by `create_router`, so the external
/// paths are exactly `/Users/...`.
pub fn routes(state: &crate::state::AppState) -> Router {
    Router::new().nest("/Users", users::router(state))
}

/// Creates a router with the /ready endpoint that performs actual health checks.
///
/// This router has state applied and can be merged with the stateless app
/// router from `create_router`. The /ready endpoint pings the database.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
