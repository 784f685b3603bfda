//! Safe wrapper around a `SQLite` database connection.

use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_void};
use std::path::Path;

use super::error::{DbError, DbResult};
use super::ffi;
use super::statement::{Statement, StepResult};
use super::value::Value;

/// A `SQLite` database connection.
///
/// Opening returns a connection or an error; no nullable handle ever crosses
/// this API. The connection is closed when dropped, or explicitly (and
/// strictly) via [`close`](Self::close). It is **not** `Sync` -- all access
/// must happen from a single thread.
pub struct Connection {
    /// Raw `sqlite3*` handle.
    db: *mut c_void,
}

// Safety: Connection is not Sync but is Send. It can be moved to another
// thread as long as only one thread accesses it at a time, which is the
// synchronous single-threaded access model here.
unsafe impl Send for Connection {}

impl Connection {
    /// Opens (or creates) a database at `path`.
    ///
    /// The file is opened read-write and created if missing, with the
    /// engine's full mutex so the handle itself is serialized.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or created (for
    /// example when the parent directory does not exist).
    pub fn open(path: &Path) -> DbResult<Self> {
        let path_str = path.to_string_lossy();
        let c_path = CString::new(path_str.as_bytes())
            .map_err(|e| DbError::new(ffi::SQLITE_ERROR, format!("invalid path: {e}")))?;

        let flags =
            ffi::SQLITE_OPEN_READWRITE | ffi::SQLITE_OPEN_CREATE | ffi::SQLITE_OPEN_FULLMUTEX;

        let mut db: *mut c_void = std::ptr::null_mut();
        let rc = unsafe {
            ffi::sqlite3_open_v2(c_path.as_ptr(), &mut db, flags, std::ptr::null())
        };
        if rc != ffi::SQLITE_OK {
            // If open failed but we got a handle, extract the error and close.
            let msg = if db.is_null() {
                format!("sqlite3_open_v2 returned {rc}")
            } else {
                let m = Self::errmsg_raw(db);
                unsafe {
                    ffi::sqlite3_close_v2(db);
                }
                m
            };
            return Err(DbError::new(rc, msg));
        }
        Ok(Self { db })
    }

    // ── execute_batch ───────────────────────────────────────────────────

    /// Executes one or more SQL statements separated by semicolons.
    ///
    /// No result rows are returned. Suitable for DDL and multi-statement
    /// scripts.
    ///
    /// # Errors
    ///
    /// Returns the first failure reported by the engine.
    pub fn execute_batch(&self, sql: &str) -> DbResult<()> {
        let c_sql = CString::new(sql)
            .map_err(|e| DbError::new(ffi::SQLITE_ERROR, format!("nul in SQL: {e}")))?;
        let mut errmsg: *mut c_char = std::ptr::null_mut();
        let rc = unsafe { ffi::sqlite3_exec(self.db, c_sql.as_ptr(), &mut errmsg) };
        if rc != ffi::SQLITE_OK {
            let msg = if errmsg.is_null() {
                self.errmsg()
            } else {
                let s = unsafe { CStr::from_ptr(errmsg) }
                    .to_string_lossy()
                    .into_owned();
                unsafe {
                    ffi::sqlite3_free(errmsg.cast());
                }
                s
            };
            return Err(DbError::new(rc, msg));
        }
        Ok(())
    }

    // ── prepare ─────────────────────────────────────────────────────────

    /// Prepares (compiles) a single SQL statement.
    ///
    /// The returned [`Statement`] borrows this connection, so the
    /// connection cannot be [`close`](Self::close)d until the statement is
    /// dropped and thereby finalized.
    ///
    /// # Errors
    ///
    /// Returns an error if the SQL does not compile.
    pub fn prepare(&self, sql: &str) -> DbResult<Statement<'_>> {
        let c_sql = CString::new(sql)
            .map_err(|e| DbError::new(ffi::SQLITE_ERROR, format!("nul in SQL: {e}")))?;
        let mut stmt: *mut c_void = std::ptr::null_mut();
        let rc = unsafe {
            ffi::sqlite3_prepare_v2(
                self.db,
                c_sql.as_ptr(),
                -1,
                &mut stmt,
                std::ptr::null_mut(),
            )
        };
        if rc != ffi::SQLITE_OK || stmt.is_null() {
            return Err(DbError::new(rc, self.errmsg()));
        }
        Ok(unsafe { Statement::from_raw(stmt, self.db) })
    }

    // ── execute (single statement) ──────────────────────────────────────

    /// Prepares and executes a single SQL statement with the given
    /// parameters.
    ///
    /// Returns the number of rows changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails to compile, bind, or
    /// execute.
    pub fn execute(&self, sql: &str, params: &[Value]) -> DbResult<usize> {
        let mut stmt = self.prepare(sql)?;
        stmt.bind_values(params)?;
        stmt.step()?;
        Ok(self.changes())
    }

    // ── query_row ───────────────────────────────────────────────────────

    /// Prepares and executes a statement, mapping exactly one result row.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or returns no rows.
    pub fn query_row<T>(
        &self,
        sql: &str,
        params: &[Value],
        mapper: impl FnOnce(&Statement<'_>) -> DbResult<T>,
    ) -> DbResult<T> {
        let mut stmt = self.prepare(sql)?;
        stmt.bind_values(params)?;
        match stmt.step()? {
            StepResult::Row => mapper(&stmt),
            StepResult::Done => Err(DbError::new(ffi::SQLITE_DONE, "query returned no rows")),
        }
    }

    /// Like [`query_row`](Self::query_row) but returns `Ok(None)` when no
    /// row is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn query_row_optional<T>(
        &self,
        sql: &str,
        params: &[Value],
        mapper: impl FnOnce(&Statement<'_>) -> DbResult<T>,
    ) -> DbResult<Option<T>> {
        let mut stmt = self.prepare(sql)?;
        stmt.bind_values(params)?;
        match stmt.step()? {
            StepResult::Row => mapper(&stmt).map(Some),
            StepResult::Done => Ok(None),
        }
    }

    // ── bookkeeping ─────────────────────────────────────────────────────

    /// Returns the rowid of the most recent successful INSERT.
    #[must_use]
    pub fn last_insert_rowid(&self) -> i64 {
        unsafe { ffi::sqlite3_last_insert_rowid(self.db) }
    }

    /// Returns the number of rows changed by the most recent statement.
    #[must_use]
    pub fn changes(&self) -> usize {
        usize::try_from(unsafe { ffi::sqlite3_changes(self.db) }).unwrap_or(0)
    }

    // ── close ───────────────────────────────────────────────────────────

    /// Closes the connection strictly, surfacing any engine-side failure.
    ///
    /// `sqlite3_close` refuses to close a handle that still has unfinalized
    /// statements. Statements borrow the connection, so the borrow checker
    /// already forces them to be dropped (finalized) before this can be
    /// called; the strict close is the engine's own accounting of the same
    /// rule. On failure the handle stays alive and the deferred close in
    /// `Drop` takes over.
    ///
    /// # Errors
    ///
    /// Returns the engine's result code (`SQLITE_BUSY` when the handle is
    /// still in use).
    pub fn close(mut self) -> DbResult<()> {
        let rc = unsafe { ffi::sqlite3_close(self.db) };
        if rc != ffi::SQLITE_OK {
            return Err(DbError::new(rc, Self::errmsg_raw(self.db)));
        }
        // The handle is gone; Drop must not touch it again.
        self.db = std::ptr::null_mut();
        Ok(())
    }

    // ── Error helpers ───────────────────────────────────────────────────

    fn errmsg(&self) -> String {
        Self::errmsg_raw(self.db)
    }

    fn errmsg_raw(db: *mut c_void) -> String {
        unsafe {
            let ptr = ffi::sqlite3_errmsg(db);
            if ptr.is_null() {
                "unknown error".to_string()
            } else {
                CStr::from_ptr(ptr).to_string_lossy().into_owned()
            }
        }
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection").finish_non_exhaustive()
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        if !self.db.is_null() {
            unsafe {
                ffi::sqlite3_close_v2(self.db);
            }
            self.db = std::ptr::null_mut();
        }
    }
}

#[cfg(test)]
impl Connection {
    /// Opens an in-memory database.
    pub fn open_in_memory() -> DbResult<Self> {
        Self::open(Path::new(":memory:"))
    }
}
