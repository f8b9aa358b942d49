//! PostgreSQL connectivity: pooled connections, startup retry, the
//! migration runner, and the readiness ping.

mod config;
mod connector;
mod health;

pub use config::PostgresConfig;
pub use connector::{connect, connect_with_retry, run_migrations};
pub use health::ping;

// Re-exported so app crates do not need a direct sea-orm dependency for
// plumbing types
pub use sea_orm::{DatabaseConnection, DbErr};
