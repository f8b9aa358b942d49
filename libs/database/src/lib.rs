//! Database access for the workspace.
//!
//! The `postgres` feature (on by default) carries the SeaORM-backed
//! connector; `common` holds the pieces any backend would share.
//!
//! ```ignore
//! use database::common::RetryPolicy;
//! use database::postgres;
//!
//! let db = postgres::connect_with_retry(&config, &RetryPolicy::startup()).await?;
//! postgres::run_migrations::<migration::Migrator>(&db).await?;
//! ```

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult};
