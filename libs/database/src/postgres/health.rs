use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};

use crate::common::{DatabaseError, DatabaseResult};

/// Round-trip `SELECT 1` to confirm the pool can reach the database.
///
/// Backs the `/ready` endpoint.
pub async fn ping(db: &DatabaseConnection) -> DatabaseResult<()> {
    let select_one = Statement::from_string(DatabaseBackend::Postgres, "SELECT 1".to_owned());

    db.query_one_raw(select_one)
        .await
        .map_err(|e| DatabaseError::Ping(e.to_string()))?;

    Ok(())
}
