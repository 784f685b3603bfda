//! Minimal safe `SQLite` wrapper backed by the bundled engine.
//!
//! This module provides a small, safe Rust API over the `SQLite` C FFI. The
//! raw symbols come from `libsqlite3-sys` with the `bundled` feature, so the
//! engine is compiled from the amalgamation the sys crate ships and no
//! system library is required.
//!
//! Consumer code (the contact store, the walkthrough binary) uses only the
//! safe types defined here and never touches raw FFI directly. The `ffi`
//! module is the **only** file that contains `unsafe` C calls.
//!
//! Resource discipline is structural: a [`Statement`] borrows its
//! [`Connection`] and is finalized when dropped, and the connection itself
//! is closed when dropped. The borrow checker therefore enforces the
//! finalize-before-close ordering the C API only checks at runtime.

mod ffi;

mod connection;
pub mod error;
mod statement;
pub mod value;

pub use connection::Connection;
pub use error::{DbError, DbErrorCode, DbResult};
pub use statement::{Statement, StepResult};
pub use value::Value;

#[cfg(test)]
mod tests;
