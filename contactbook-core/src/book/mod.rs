//! Contact store built on the safe `SQLite` wrapper.
//!
//! [`ContactBook`] is the explicit context object for every operation:
//! opening it yields a value (never a nullable handle), each operation
//! borrows it, and closing consumes it. Insertion compiles one statement
//! and reuses it for every row; querying hands back a lazy iterator.

mod contact;
mod error;
mod rows;
mod schema;

use std::path::Path;

use tracing::{debug, warn};

use crate::db::{Connection, DbResult, Statement};
use crate::params;

pub use contact::Contact;
pub use error::{StoreError, StoreResult};
pub use rows::Contacts;

/// Contact database wrapper.
#[derive(Debug)]
pub struct ContactBook {
    conn: Connection,
}

impl ContactBook {
    /// Opens or creates the contact database at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the database cannot be opened
    /// or created. This is the one failure the sequential walkthrough
    /// treats as fatal.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let conn = Connection::open(path).map_err(StoreError::Connection)?;
        debug!(path = %path.display(), "opened contact database");
        Ok(Self { conn })
    }

    /// Creates the `Contact` table.
    ///
    /// There is no `IF NOT EXISTS` escape hatch: calling this twice on the
    /// same database fails the second time, leaving the existing table and
    /// its rows untouched.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Schema`] if the DDL cannot be compiled or
    /// executed (for example because the table already exists).
    pub fn create_table(&self) -> StoreResult<()> {
        schema::create_schema(&self.conn)?;
        debug!("created Contact table");
        Ok(())
    }

    /// Inserts `contacts` through a single prepared statement reused for
    /// every row.
    ///
    /// The INSERT is compiled once. Each row is bound, stepped to
    /// completion, and the statement reset for the next row; the statement
    /// is finalized when the batch ends. A row that fails (for example a
    /// duplicate id) occupies its slot in the returned vector and does not
    /// stop the remaining rows. Outcomes are in input order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Statement`] if the INSERT cannot be compiled,
    /// in which case nothing is inserted. Per-row failures are
    /// [`StoreError::Row`] entries in the returned vector.
    pub fn insert_contacts(&self, contacts: &[Contact]) -> StoreResult<Vec<StoreResult<()>>> {
        let mut stmt = self
            .conn
            .prepare("INSERT INTO Contact (Id, Name) VALUES (?, ?);")
            .map_err(StoreError::Statement)?;
        debug!(count = contacts.len(), "inserting contacts");
        let mut outcomes = Vec::with_capacity(contacts.len());
        for contact in contacts {
            let outcome = insert_row(&mut stmt, contact).map_err(StoreError::Row);
            if let Err(err) = &outcome {
                warn!(id = contact.id, %err, "failed to insert contact");
            }
            outcomes.push(outcome);
            // A failed step's error code is re-reported by reset; the row
            // outcome above already carries it.
            let _ = stmt.reset();
        }
        Ok(outcomes)
    }

    /// Queries every stored contact.
    ///
    /// The returned [`Contacts`] iterator reads rows lazily: the SELECT
    /// advances one row per `next` call and the sequence cannot be
    /// restarted. Call `query_all` again for a fresh pass. An empty table
    /// yields an empty sequence, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Statement`] if the SELECT cannot be compiled
    /// (for example when the table does not exist).
    pub fn query_all(&self) -> StoreResult<Contacts<'_>> {
        let stmt = self
            .conn
            .prepare("SELECT * FROM Contact;")
            .map_err(StoreError::Statement)?;
        debug!("querying all contacts");
        Ok(Contacts::new(stmt))
    }

    /// Closes the underlying connection, strictly.
    ///
    /// Dropping a `ContactBook` also closes the connection; the explicit
    /// form surfaces a failure instead of discarding it, which is what the
    /// walkthrough's final step wants.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the engine refuses to close
    /// the handle.
    pub fn close(self) -> StoreResult<()> {
        debug!("closing contact database");
        self.conn.close().map_err(StoreError::Connection)
    }
}

fn insert_row(stmt: &mut Statement<'_>, contact: &Contact) -> DbResult<()> {
    stmt.bind_values(params![contact.id, contact.name.as_str()])?;
    stmt.step()?;
    Ok(())
}
