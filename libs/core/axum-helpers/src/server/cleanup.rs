//! Shutdown cleanup for database pools.

use tracing::{info, warn};

/// Close a SeaORM connection pool, logging the outcome.
///
/// Dropping the pool would close it too; doing it explicitly makes the
/// shutdown sequence visible in the logs.
pub async fn close_postgres(db: sea_orm::DatabaseConnection, name: &str) {
    match db.close().await {
        Ok(()) => info!(pool = name, "PostgreSQL pool closed"),
        Err(e) => warn!(pool = name, error = %e, "Closing the PostgreSQL pool failed"),
    }
}
