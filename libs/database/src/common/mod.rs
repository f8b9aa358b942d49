//! Backend-independent pieces: the error type and retry support.

pub mod error;
pub mod retry;

pub use error::{DatabaseError, DatabaseResult};
pub use retry::{with_retry, RetryPolicy};
