//! A contact table over the `SQLite` C API, rendered safely.
//!
//! The crate has two layers:
//!
//! * [`db`] -- a minimal safe wrapper over the `SQLite` C FFI: a
//!   [`Connection`] opened at a path, [`Statement`]s compiled from it, and
//!   the bind / step / reset / finalize cycle expressed as methods whose
//!   cleanup runs in `Drop` on every exit path.
//! * [`book`] -- the contact store built on that wrapper: a [`ContactBook`]
//!   context object that creates the `Contact` table, inserts rows through
//!   one reused prepared statement, and reads them back through a lazy
//!   iterator.
//!
//! The `contactbook` binary walks through the whole sequence against a file
//! database and prints each stored row as `id | name`.

pub mod db;

pub mod book;

pub use book::{Contact, ContactBook, Contacts, StoreError, StoreResult};
pub use db::{Connection, DbError, DbErrorCode, DbResult, Statement, StepResult, Value};
