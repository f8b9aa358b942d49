//! Application state management.
//!
//! This module defines the shared application state passed to request
//! handlers that need it (readiness checks, domain wiring).

/// Shared application state.
///
/// Cloning is inexpensive: the database connection is an Arc-backed pool
/// handle.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL database connection pool
    pub db: database::postgres::DatabaseConnection,
}
