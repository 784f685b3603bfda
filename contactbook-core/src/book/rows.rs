//! Lazy iteration over contact query results.

use crate::db::{Statement, StepResult};

use super::contact::Contact;
use super::error::{StoreError, StoreResult};

/// Iterator over the rows of a contact query.
///
/// Each call to `next` advances the underlying statement by one row, so
/// rows are read straight out of the engine rather than collected up front.
/// The sequence is finite and cannot be restarted; query again for a fresh
/// pass. The statement is finalized when the iterator is dropped, on every
/// path out of the iteration.
pub struct Contacts<'conn> {
    stmt: Statement<'conn>,
    /// Set once the statement reports completion or an error.
    done: bool,
}

impl<'conn> Contacts<'conn> {
    pub(super) const fn new(stmt: Statement<'conn>) -> Self {
        Self { stmt, done: false }
    }
}

impl Iterator for Contacts<'_> {
    type Item = StoreResult<Contact>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.stmt.step() {
            Ok(StepResult::Row) => Some(Ok(Contact::new(
                self.stmt.column_i64(0),
                self.stmt.column_text(1),
            ))),
            Ok(StepResult::Done) => {
                self.done = true;
                None
            }
            Err(err) => {
                // Yield the failure once, then end the sequence.
                self.done = true;
                Some(Err(StoreError::Statement(err)))
            }
        }
    }
}
