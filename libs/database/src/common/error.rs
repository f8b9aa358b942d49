use thiserror::Error;

/// Errors surfaced by the database layer.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// SeaORM/sqlx failures, passed through unchanged
    #[cfg(feature = "postgres")]
    #[error(transparent)]
    Orm(#[from] sea_orm::DbErr),

    /// The readiness ping did not get an answer
    #[error("database ping failed: {0}")]
    Ping(String),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;
