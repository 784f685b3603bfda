//! Raw FFI surface over the bundled `SQLite` library.
//!
//! The symbols come from `libsqlite3-sys` (with the `bundled` feature, so
//! the engine is compiled from the amalgamation the crate ships). All handle
//! pointers are normalised to `*mut c_void` so the sys crate's opaque types
//! (`sqlite3`, `sqlite3_stmt`) do not leak into the rest of the code.
//!
//! This is the **only** file that talks to the sys crate; consumer code uses
//! the safe [`Connection`](super::Connection) / [`Statement`](super::Statement)
//! types and never touches raw FFI directly.

#![allow(dead_code)]

use std::os::raw::{c_char, c_int, c_void};

use libsqlite3_sys as sys;

// ── SQLite result codes ─────────────────────────────────────────────────

pub const SQLITE_OK: c_int = sys::SQLITE_OK;
pub const SQLITE_ERROR: c_int = sys::SQLITE_ERROR;
pub const SQLITE_BUSY: c_int = sys::SQLITE_BUSY;
pub const SQLITE_TOOBIG: c_int = sys::SQLITE_TOOBIG;
pub const SQLITE_CONSTRAINT: c_int = sys::SQLITE_CONSTRAINT;
pub const SQLITE_MISUSE: c_int = sys::SQLITE_MISUSE;
pub const SQLITE_ROW: c_int = sys::SQLITE_ROW;
pub const SQLITE_DONE: c_int = sys::SQLITE_DONE;

// Column type constants
pub const SQLITE_INTEGER: c_int = sys::SQLITE_INTEGER;
pub const SQLITE_FLOAT: c_int = sys::SQLITE_FLOAT;
pub const SQLITE_TEXT: c_int = sys::SQLITE_TEXT;
pub const SQLITE_BLOB: c_int = sys::SQLITE_BLOB;
pub const SQLITE_NULL: c_int = sys::SQLITE_NULL;

// Open flags
pub const SQLITE_OPEN_READWRITE: c_int = sys::SQLITE_OPEN_READWRITE;
pub const SQLITE_OPEN_CREATE: c_int = sys::SQLITE_OPEN_CREATE;
pub const SQLITE_OPEN_FULLMUTEX: c_int = sys::SQLITE_OPEN_FULLMUTEX;

// ── Connection lifecycle ────────────────────────────────────────────────

pub unsafe fn sqlite3_open_v2(
    filename: *const c_char,
    pp_db: *mut *mut c_void,
    flags: c_int,
    z_vfs: *const c_char,
) -> c_int {
    // The sys crate expects its own opaque pointer type; cast through.
    let pp = pp_db.cast::<*mut sys::sqlite3>();
    sys::sqlite3_open_v2(filename, pp, flags, z_vfs)
}

/// Strict close: fails with `SQLITE_BUSY` if statements are unfinalized.
pub unsafe fn sqlite3_close(db: *mut c_void) -> c_int {
    sys::sqlite3_close(db.cast())
}

/// Deferred close: always succeeds, freeing the handle once the last
/// statement is finalized.
pub unsafe fn sqlite3_close_v2(db: *mut c_void) -> c_int {
    sys::sqlite3_close_v2(db.cast())
}

// ── Execution ───────────────────────────────────────────────────────────

pub unsafe fn sqlite3_exec(
    db: *mut c_void,
    sql: *const c_char,
    errmsg: *mut *mut c_char,
) -> c_int {
    // No row callback; failures come back through `errmsg`.
    sys::sqlite3_exec(db.cast(), sql, None, std::ptr::null_mut(), errmsg)
}

pub unsafe fn sqlite3_free(ptr: *mut c_void) {
    sys::sqlite3_free(ptr);
}

// ── Prepared statements ─────────────────────────────────────────────────

pub unsafe fn sqlite3_prepare_v2(
    db: *mut c_void,
    z_sql: *const c_char,
    n_byte: c_int,
    pp_stmt: *mut *mut c_void,
    pz_tail: *mut *const c_char,
) -> c_int {
    let pp = pp_stmt.cast::<*mut sys::sqlite3_stmt>();
    sys::sqlite3_prepare_v2(db.cast(), z_sql, n_byte, pp, pz_tail)
}

pub unsafe fn sqlite3_step(stmt: *mut c_void) -> c_int {
    sys::sqlite3_step(stmt.cast())
}

pub unsafe fn sqlite3_reset(stmt: *mut c_void) -> c_int {
    sys::sqlite3_reset(stmt.cast())
}

pub unsafe fn sqlite3_finalize(stmt: *mut c_void) -> c_int {
    sys::sqlite3_finalize(stmt.cast())
}

// ── Parameter binding ───────────────────────────────────────────────────

pub unsafe fn sqlite3_bind_int64(stmt: *mut c_void, index: c_int, value: i64) -> c_int {
    sys::sqlite3_bind_int64(stmt.cast(), index, value)
}

pub unsafe fn sqlite3_bind_blob(
    stmt: *mut c_void,
    index: c_int,
    value: *const c_void,
    n: c_int,
) -> c_int {
    // SQLITE_TRANSIENT: the engine copies the buffer during the call, so
    // the Rust slice does not have to outlive the statement.
    sys::sqlite3_bind_blob(stmt.cast(), index, value, n, sys::SQLITE_TRANSIENT())
}

pub unsafe fn sqlite3_bind_text(
    stmt: *mut c_void,
    index: c_int,
    value: *const c_char,
    n: c_int,
) -> c_int {
    sys::sqlite3_bind_text(stmt.cast(), index, value, n, sys::SQLITE_TRANSIENT())
}

pub unsafe fn sqlite3_bind_null(stmt: *mut c_void, index: c_int) -> c_int {
    sys::sqlite3_bind_null(stmt.cast(), index)
}

pub unsafe fn sqlite3_bind_parameter_count(stmt: *mut c_void) -> c_int {
    sys::sqlite3_bind_parameter_count(stmt.cast())
}

// ── Column reading ──────────────────────────────────────────────────────

pub unsafe fn sqlite3_column_int64(stmt: *mut c_void, i_col: c_int) -> i64 {
    sys::sqlite3_column_int64(stmt.cast(), i_col)
}

pub unsafe fn sqlite3_column_blob(stmt: *mut c_void, i_col: c_int) -> *const c_void {
    sys::sqlite3_column_blob(stmt.cast(), i_col)
}

pub unsafe fn sqlite3_column_bytes(stmt: *mut c_void, i_col: c_int) -> c_int {
    sys::sqlite3_column_bytes(stmt.cast(), i_col)
}

pub unsafe fn sqlite3_column_text(stmt: *mut c_void, i_col: c_int) -> *const c_char {
    // The sys crate returns `*const c_uchar`; normalise to `c_char`.
    sys::sqlite3_column_text(stmt.cast(), i_col).cast()
}

pub unsafe fn sqlite3_column_type(stmt: *mut c_void, i_col: c_int) -> c_int {
    sys::sqlite3_column_type(stmt.cast(), i_col)
}

pub unsafe fn sqlite3_column_count(stmt: *mut c_void) -> c_int {
    sys::sqlite3_column_count(stmt.cast())
}

// ── Error reporting ─────────────────────────────────────────────────────

pub unsafe fn sqlite3_errmsg(db: *mut c_void) -> *const c_char {
    sys::sqlite3_errmsg(db.cast())
}

// ── Changes ─────────────────────────────────────────────────────────────

pub unsafe fn sqlite3_changes(db: *mut c_void) -> c_int {
    sys::sqlite3_changes(db.cast())
}

pub unsafe fn sqlite3_last_insert_rowid(db: *mut c_void) -> i64 {
    sys::sqlite3_last_insert_rowid(db.cast())
}
