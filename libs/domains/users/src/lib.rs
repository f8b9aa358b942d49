//! The user directory domain: listing with search, sort, and pagination;
//! creation; single-record reads; full-field updates; soft deletion; and
//! restore.
//!
//! Layering is handlers → service → repository. Handlers own the HTTP
//! envelopes and OpenAPI annotations, the service owns the business rules
//! (duplicate-email checks, pagination math), and the `UserRepository`
//! trait hides the store behind explicit soft-delete scopes. Two
//! implementations exist: `PgUserRepository` for production and
//! `InMemoryUserRepository` for tests and local tinkering.
//!
//! Soft deletion sets `deleted_at` instead of removing the row. The listing
//! always includes soft-deleted users, single-record lookups see only
//! active rows, and restore looks across both.
//!
//! ```rust,no_run
//! use domain_users::{handlers, InMemoryUserRepository, UserService};
//!
//! let service = UserService::new(InMemoryUserRepository::new());
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{UserError, UserResult};
pub use models::{
    CreateUser, ListUsers, PaginationMeta, SortColumn, SortDir, UpdateUser, User, UserIdRequest,
    UserListItem, UserPage, UserQuery,
};
pub use postgres::PgUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
