//! Unit tests for the safe `SQLite` wrapper.

use super::*;
use crate::params;

#[test]
fn test_open_in_memory() {
    let conn = Connection::open_in_memory().expect("open in-memory db");
    conn.execute_batch("CREATE TABLE t (id INTEGER PRIMARY KEY, val TEXT);")
        .expect("create table");
    conn.execute(
        "INSERT INTO t (id, val) VALUES (?1, ?2)",
        params![Value::Integer(1), Value::from("hello")],
    )
    .expect("insert");
    let result = conn
        .query_row(
            "SELECT val FROM t WHERE id = ?1",
            params![Value::Integer(1)],
            |stmt| Ok(stmt.column_text(0)),
        )
        .expect("query");
    assert_eq!(result, "hello");
}

#[test]
fn test_open_missing_directory_fails() {
    let dir = tempfile::TempDir::new().expect("temp dir");
    let path = dir.path().join("missing").join("db.sqlite");
    let err = Connection::open(&path).expect_err("open should fail");
    assert_ne!(err.code.0, ffi::SQLITE_OK);
    assert!(!err.message.is_empty());
}

#[test]
fn test_query_row_optional_none() {
    let conn = Connection::open_in_memory().expect("open in-memory db");
    conn.execute_batch("CREATE TABLE t (id INTEGER PRIMARY KEY);")
        .expect("create table");
    let result = conn
        .query_row_optional("SELECT id FROM t WHERE id = 999", &[], |stmt| {
            Ok(stmt.column_i64(0))
        })
        .expect("query");
    assert!(result.is_none());
}

#[test]
fn test_blob_round_trip() {
    let conn = Connection::open_in_memory().expect("open in-memory db");
    conn.execute_batch("CREATE TABLE t (id INTEGER PRIMARY KEY, data BLOB);")
        .expect("create table");
    let data = vec![0xDE, 0xAD, 0xBE, 0xEF];
    conn.execute(
        "INSERT INTO t (id, data) VALUES (?1, ?2)",
        params![Value::Integer(1), data.as_slice()],
    )
    .expect("insert");
    let result = conn
        .query_row("SELECT data FROM t WHERE id = 1", &[], |stmt| {
            Ok(stmt.column_blob(0))
        })
        .expect("query");
    assert_eq!(result, data);
}

#[test]
fn test_null_handling() {
    let conn = Connection::open_in_memory().expect("open in-memory db");
    conn.execute_batch("CREATE TABLE t (id INTEGER PRIMARY KEY, val TEXT);")
        .expect("create table");
    conn.execute(
        "INSERT INTO t (id, val) VALUES (?1, ?2)",
        params![Value::Integer(1), Value::Null],
    )
    .expect("insert");
    let result = conn
        .query_row("SELECT val FROM t WHERE id = 1", &[], |stmt| {
            Ok(stmt.is_column_null(0))
        })
        .expect("query");
    assert!(result);
}

#[test]
fn test_column_types() {
    let conn = Connection::open_in_memory().expect("open in-memory db");
    conn.execute_batch("CREATE TABLE t (id INTEGER PRIMARY KEY, val TEXT);")
        .expect("create table");
    conn.execute(
        "INSERT INTO t (id, val) VALUES (?1, ?2)",
        params![Value::Integer(7), Value::from("seven")],
    )
    .expect("insert");
    let (id_type, val_type) = conn
        .query_row("SELECT id, val FROM t WHERE id = 7", &[], |stmt| {
            Ok((stmt.column_type(0), stmt.column_type(1)))
        })
        .expect("query");
    assert_eq!(id_type, ffi::SQLITE_INTEGER);
    assert_eq!(val_type, ffi::SQLITE_TEXT);
}

#[test]
fn test_prepare_invalid_sql() {
    let conn = Connection::open_in_memory().expect("open in-memory db");
    let err = match conn.prepare("THIS IS NOT SQL") {
        Ok(_) => panic!("prepare should fail"),
        Err(err) => err,
    };
    assert_ne!(err.code.0, ffi::SQLITE_OK);
    assert!(!err.message.is_empty());
}

#[test]
fn test_bind_arity_mismatch() {
    let conn = Connection::open_in_memory().expect("open in-memory db");
    conn.execute_batch("CREATE TABLE t (id INTEGER PRIMARY KEY, val TEXT);")
        .expect("create table");
    let mut stmt = conn
        .prepare("INSERT INTO t (id, val) VALUES (?1, ?2)")
        .expect("prepare");
    let err = stmt
        .bind_values(params![Value::Integer(1)])
        .expect_err("bind should fail");
    assert_eq!(err.code.primary(), ffi::SQLITE_MISUSE);
}

#[test]
fn test_constraint_violation_is_recognised() {
    let conn = Connection::open_in_memory().expect("open in-memory db");
    conn.execute_batch("CREATE TABLE t (id INTEGER PRIMARY KEY NOT NULL);")
        .expect("create table");
    conn.execute("INSERT INTO t (id) VALUES (?1)", params![Value::Integer(1)])
        .expect("first insert");
    let err = conn
        .execute("INSERT INTO t (id) VALUES (?1)", params![Value::Integer(1)])
        .expect_err("duplicate insert should fail");
    assert!(err.is_constraint(), "unexpected error: {err}");
}

#[test]
fn test_statement_reuse_with_reset() {
    let conn = Connection::open_in_memory().expect("open in-memory db");
    conn.execute_batch("CREATE TABLE t (id INTEGER PRIMARY KEY, val TEXT);")
        .expect("create table");
    let mut stmt = conn
        .prepare("INSERT INTO t (id, val) VALUES (?1, ?2)")
        .expect("prepare");
    for (id, val) in [(1_i64, "one"), (2, "two"), (3, "three")] {
        stmt.bind_values(params![Value::Integer(id), val])
            .expect("bind");
        assert_eq!(stmt.step().expect("step"), StepResult::Done);
        stmt.reset().expect("reset");
    }
    drop(stmt);
    let count = conn
        .query_row("SELECT COUNT(*) FROM t", &[], |stmt| Ok(stmt.column_i64(0)))
        .expect("count");
    assert_eq!(count, 3);
}

#[test]
fn test_execute_reports_changed_rows() {
    let conn = Connection::open_in_memory().expect("open in-memory db");
    conn.execute_batch("CREATE TABLE t (id INTEGER PRIMARY KEY, val TEXT);")
        .expect("create table");
    let changed = conn
        .execute(
            "INSERT INTO t (id, val) VALUES (?1, ?2)",
            params![Value::Integer(1), Value::from("row")],
        )
        .expect("insert");
    assert_eq!(changed, 1);
}

#[test]
fn test_last_insert_rowid() {
    let conn = Connection::open_in_memory().expect("open in-memory db");
    conn.execute_batch("CREATE TABLE t (id INTEGER PRIMARY KEY, val TEXT);")
        .expect("create table");
    conn.execute(
        "INSERT INTO t (val) VALUES (?1)",
        params![Value::from("first")],
    )
    .expect("insert");
    assert_eq!(conn.last_insert_rowid(), 1);
}

#[test]
fn test_column_and_parameter_counts() {
    let conn = Connection::open_in_memory().expect("open in-memory db");
    conn.execute_batch("CREATE TABLE t (id INTEGER PRIMARY KEY, val TEXT);")
        .expect("create table");
    let stmt = conn
        .prepare("SELECT id, val FROM t WHERE id = ?1")
        .expect("prepare");
    assert_eq!(stmt.parameter_count(), 1);
    assert_eq!(stmt.column_count(), 2);
}

#[test]
fn test_strict_close() {
    let conn = Connection::open_in_memory().expect("open in-memory db");
    conn.execute_batch("CREATE TABLE t (id INTEGER PRIMARY KEY);")
        .expect("create table");
    {
        let mut stmt = conn.prepare("SELECT id FROM t").expect("prepare");
        assert_eq!(stmt.step().expect("step"), StepResult::Done);
    }
    conn.close().expect("close");
}
