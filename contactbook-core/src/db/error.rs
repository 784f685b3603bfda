//! Database error types for the safe `SQLite` wrapper.

use std::fmt;

use super::ffi;

/// Error code returned by `SQLite` operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DbErrorCode(pub i32);

impl DbErrorCode {
    /// Returns the primary result code.
    ///
    /// Extended result codes carry extra detail in the upper bits; the low
    /// byte is the primary code tables and callers match on.
    #[must_use]
    pub const fn primary(self) -> i32 {
        self.0 & 0xff
    }
}

impl fmt::Display for DbErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned by database operations.
#[derive(Debug, PartialEq, Eq)]
pub struct DbError {
    /// `SQLite` result code.
    pub code: DbErrorCode,
    /// Human-readable error message (from `sqlite3_errmsg` when available).
    pub message: String,
}

impl DbError {
    /// Creates a new database error.
    pub(crate) fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code: DbErrorCode(code),
            message: message.into(),
        }
    }

    /// Returns `true` if this error is a constraint violation (for example a
    /// duplicate primary key).
    #[must_use]
    pub const fn is_constraint(&self) -> bool {
        self.code.primary() == ffi::SQLITE_CONSTRAINT
    }
}

impl fmt::Display for DbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sqlite error {}: {}", self.code, self.message)
    }
}

impl std::error::Error for DbError {}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
