//! Contact table DDL.

use crate::db::Connection;

use super::error::{StoreError, StoreResult};

/// Table definition.
///
/// Deliberately without `IF NOT EXISTS`: creating the table a second time
/// is an error, and must leave the existing table's rows untouched.
pub(super) const CREATE_CONTACT_TABLE: &str =
    "CREATE TABLE Contact (Id INTEGER PRIMARY KEY NOT NULL, Name TEXT);";

pub(super) fn create_schema(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch(CREATE_CONTACT_TABLE)
        .map_err(StoreError::Schema)
}
