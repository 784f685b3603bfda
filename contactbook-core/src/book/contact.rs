//! The contact record type.

use std::fmt;

/// A single entry in the `Contact` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    /// Unique identifier, assigned by the caller. Uniqueness is enforced by
    /// the table's primary key, not by application logic.
    pub id: i64,
    /// Display name.
    pub name: String,
}

impl Contact {
    /// Creates a contact record.
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {}", self.id, self.name)
    }
}
