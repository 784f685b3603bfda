//! Error taxonomy for contact store operations.

use thiserror::Error;

use crate::db::DbError;

/// Result type for contact store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by contact store operations.
///
/// The variants separate failures by how callers are expected to react:
/// only [`StoreError::Connection`] is fatal to the walkthrough; the others
/// are reported and the run continues.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database file could not be opened, created, or closed.
    #[error("connection error: {0}")]
    Connection(DbError),

    /// The schema could not be created.
    #[error("schema error: {0}")]
    Schema(DbError),

    /// A statement could not be compiled or evaluated.
    #[error("statement error: {0}")]
    Statement(DbError),

    /// A single row failed to insert; other rows are unaffected.
    #[error("row error: {0}")]
    Row(DbError),
}
