//! Safe wrapper around a `SQLite` prepared statement.

use std::ffi::CStr;
use std::marker::PhantomData;
use std::os::raw::{c_int, c_void};

use super::connection::Connection;
use super::error::{DbError, DbResult};
use super::ffi;
use super::value::Value;

/// Result of a single `sqlite3_step` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// A result row is available (`SQLITE_ROW`).
    Row,
    /// The statement has finished executing (`SQLITE_DONE`).
    Done,
}

/// A prepared `SQLite` statement.
///
/// Created via [`Connection::prepare`] and tied to the lifetime of the
/// connection that compiled it, so the connection cannot be consumed by
/// [`Connection::close`] while the statement is alive. Finalized when
/// dropped.
pub struct Statement<'conn> {
    /// Raw `sqlite3_stmt*` handle. Null only after finalization.
    stmt: *mut c_void,
    /// Raw `sqlite3*` handle, kept for error messages.
    db: *mut c_void,
    /// Marker tying the statement to the connection that compiled it.
    conn: PhantomData<&'conn Connection>,
}

impl Statement<'_> {
    /// Wraps a raw pointer pair.
    ///
    /// # Safety
    ///
    /// `stmt` must be a valid, non-null `sqlite3_stmt*`.
    /// `db` must be the owning `sqlite3*` handle.
    pub(super) unsafe fn from_raw(stmt: *mut c_void, db: *mut c_void) -> Self {
        debug_assert!(!stmt.is_null());
        Self {
            stmt,
            db,
            conn: PhantomData,
        }
    }

    // ── Binding ─────────────────────────────────────────────────────────

    /// Binds a slice of [`Value`]s to the statement parameters (1-indexed).
    ///
    /// The slice length must match the statement's parameter count exactly;
    /// a mismatch fails before anything is bound.
    ///
    /// # Errors
    ///
    /// Returns an error on an arity mismatch, an oversized text or blob
    /// parameter, or an engine-side bind failure.
    pub fn bind_values(&mut self, values: &[Value]) -> DbResult<()> {
        let expected = self.parameter_count();
        if values.len() != expected {
            return Err(DbError::new(
                ffi::SQLITE_MISUSE,
                format!(
                    "statement expects {expected} parameters, got {}",
                    values.len()
                ),
            ));
        }
        for (i, val) in values.iter().enumerate() {
            let idx = i32::try_from(i + 1).expect("parameter index overflow");
            let rc = match val {
                Value::Integer(v) => unsafe {
                    ffi::sqlite3_bind_int64(self.stmt, idx, *v)
                },
                Value::Blob(v) => {
                    let len = buffer_len(v.len())?;
                    unsafe {
                        ffi::sqlite3_bind_blob(self.stmt, idx, v.as_ptr().cast(), len)
                    }
                }
                Value::Text(v) => {
                    let len = buffer_len(v.len())?;
                    unsafe {
                        ffi::sqlite3_bind_text(self.stmt, idx, v.as_ptr().cast(), len)
                    }
                }
                Value::Null => unsafe { ffi::sqlite3_bind_null(self.stmt, idx) },
            };
            if rc != ffi::SQLITE_OK {
                return Err(self.last_error(rc));
            }
        }
        Ok(())
    }

    /// Returns the number of bindable parameters in the statement.
    pub fn parameter_count(&self) -> usize {
        usize::try_from(unsafe { ffi::sqlite3_bind_parameter_count(self.stmt) }).unwrap_or(0)
    }

    // ── Stepping ────────────────────────────────────────────────────────

    /// Executes a single step.
    ///
    /// # Errors
    ///
    /// Returns an error for any result code other than `SQLITE_ROW` or
    /// `SQLITE_DONE` (for example a constraint violation).
    pub fn step(&mut self) -> DbResult<StepResult> {
        let rc = unsafe { ffi::sqlite3_step(self.stmt) };
        match rc {
            ffi::SQLITE_ROW => Ok(StepResult::Row),
            ffi::SQLITE_DONE => Ok(StepResult::Done),
            _ => Err(self.last_error(rc)),
        }
    }

    /// Resets the statement so it can be stepped again.
    ///
    /// Bindings are kept; the compiled form is reused. Note that when the
    /// most recent [`step`](Self::step) failed, `sqlite3_reset` re-reports
    /// that step's error code, so callers looping over rows must decide
    /// whether that repeat is worth surfacing.
    ///
    /// # Errors
    ///
    /// Returns the engine's result code when the reset fails (or when it
    /// re-reports a failed step, as above).
    pub fn reset(&mut self) -> DbResult<()> {
        let rc = unsafe { ffi::sqlite3_reset(self.stmt) };
        if rc != ffi::SQLITE_OK {
            return Err(self.last_error(rc));
        }
        Ok(())
    }

    // ── Column reading ──────────────────────────────────────────────────

    /// Returns the number of columns in the result set.
    pub fn column_count(&self) -> usize {
        usize::try_from(unsafe { ffi::sqlite3_column_count(self.stmt) }).unwrap_or(0)
    }

    /// Reads a column as `i64`.
    pub fn column_i64(&self, idx: usize) -> i64 {
        let idx = i32::try_from(idx).expect("column index overflow");
        unsafe { ffi::sqlite3_column_int64(self.stmt, idx) }
    }

    /// Reads a column as a blob. Returns an empty `Vec` for NULL.
    pub fn column_blob(&self, idx: usize) -> Vec<u8> {
        let idx = i32::try_from(idx).expect("column index overflow");
        unsafe {
            let ptr = ffi::sqlite3_column_blob(self.stmt, idx);
            let len = ffi::sqlite3_column_bytes(self.stmt, idx);
            if ptr.is_null() || len <= 0 {
                return Vec::new();
            }
            std::slice::from_raw_parts(ptr.cast::<u8>(), len as usize).to_vec()
        }
    }

    /// Reads a column as a UTF-8 string. Returns an empty string for NULL.
    pub fn column_text(&self, idx: usize) -> String {
        let idx = i32::try_from(idx).expect("column index overflow");
        unsafe {
            let ptr = ffi::sqlite3_column_text(self.stmt, idx);
            if ptr.is_null() {
                return String::new();
            }
            CStr::from_ptr(ptr).to_string_lossy().into_owned()
        }
    }

    /// Returns the storage class of column `idx`.
    pub fn column_type(&self, idx: usize) -> c_int {
        let idx = i32::try_from(idx).expect("column index overflow");
        unsafe { ffi::sqlite3_column_type(self.stmt, idx) }
    }

    /// Returns `true` if the column is SQL NULL.
    pub fn is_column_null(&self, idx: usize) -> bool {
        self.column_type(idx) == ffi::SQLITE_NULL
    }

    // ── Helpers ─────────────────────────────────────────────────────────

    fn last_error(&self, code: c_int) -> DbError {
        let msg = unsafe {
            let ptr = ffi::sqlite3_errmsg(self.db);
            if ptr.is_null() {
                "unknown error".to_string()
            } else {
                CStr::from_ptr(ptr).to_string_lossy().into_owned()
            }
        };
        DbError::new(code, msg)
    }
}

fn buffer_len(len: usize) -> DbResult<c_int> {
    c_int::try_from(len)
        .map_err(|_| DbError::new(ffi::SQLITE_TOOBIG, "parameter exceeds maximum length"))
}

impl Drop for Statement<'_> {
    fn drop(&mut self) {
        if !self.stmt.is_null() {
            unsafe {
                ffi::sqlite3_finalize(self.stmt);
            }
            self.stmt = std::ptr::null_mut();
        }
    }
}
