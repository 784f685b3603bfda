//! End-to-end walkthrough against file-backed databases.

use std::path::PathBuf;

use contactbook_core::{params, Connection, Contact, ContactBook, StoreError, Value};
use tempfile::TempDir;

fn db_path(dir: &TempDir) -> PathBuf {
    dir.path().join("contacts.sqlite")
}

fn demo_contacts() -> Vec<Contact> {
    vec![
        Contact::new(1, "Ray"),
        Contact::new(2, "Emma"),
        Contact::new(3, "Andrew"),
        Contact::new(4, "Chris"),
    ]
}

#[test]
fn test_full_walkthrough() {
    let dir = TempDir::new().expect("temp dir");
    let path = db_path(&dir);

    let book = ContactBook::open(&path).expect("open database");
    book.create_table().expect("create table");

    let outcomes = book
        .insert_contacts(&demo_contacts())
        .expect("prepare insert");
    assert!(outcomes.iter().all(Result::is_ok));

    let lines: Vec<String> = book
        .query_all()
        .expect("prepare query")
        .map(|row| row.map(|contact| contact.to_string()))
        .collect::<Result<_, _>>()
        .expect("read rows");
    assert_eq!(lines, ["1 | Ray", "2 | Emma", "3 | Andrew", "4 | Chris"]);

    book.close().expect("close database");
}

#[test]
fn test_rows_persist_across_reopen() {
    let dir = TempDir::new().expect("temp dir");
    let path = db_path(&dir);

    {
        let book = ContactBook::open(&path).expect("open database");
        book.create_table().expect("create table");
        let outcomes = book
            .insert_contacts(&demo_contacts())
            .expect("prepare insert");
        assert!(outcomes.iter().all(Result::is_ok));
        book.close().expect("close database");
    }

    let book = ContactBook::open(&path).expect("reopen database");
    let queried: Vec<Contact> = book
        .query_all()
        .expect("prepare query")
        .collect::<Result<_, _>>()
        .expect("read rows");
    assert_eq!(queried, demo_contacts());
    book.close().expect("close database");
}

#[test]
fn test_duplicate_id_on_disk_partial_failure() {
    let dir = TempDir::new().expect("temp dir");
    let path = db_path(&dir);

    let book = ContactBook::open(&path).expect("open database");
    book.create_table().expect("create table");
    book.insert_contacts(&[Contact::new(1, "Ray")])
        .expect("prepare insert")
        .remove(0)
        .expect("insert first row");

    let outcomes = book
        .insert_contacts(&[Contact::new(1, "Again"), Contact::new(2, "Emma")])
        .expect("prepare insert");
    match &outcomes[0] {
        Err(StoreError::Row(db)) => assert!(db.is_constraint(), "unexpected error: {db}"),
        other => panic!("expected a row error, got {other:?}"),
    }
    assert!(outcomes[1].is_ok());

    let queried: Vec<Contact> = book
        .query_all()
        .expect("prepare query")
        .collect::<Result<_, _>>()
        .expect("read rows");
    assert_eq!(
        queried,
        vec![Contact::new(1, "Ray"), Contact::new(2, "Emma")],
        "the duplicate must not overwrite the original row"
    );
    book.close().expect("close database");
}

#[test]
fn test_connection_layer_on_disk() {
    let dir = TempDir::new().expect("temp dir");
    let path = db_path(&dir);

    {
        let conn = Connection::open(&path).expect("open database");
        conn.execute_batch("CREATE TABLE t (id INTEGER PRIMARY KEY NOT NULL, val TEXT);")
            .expect("create table");
        let changed = conn
            .execute(
                "INSERT INTO t (id, val) VALUES (?1, ?2)",
                params![Value::Integer(1), Value::from("persisted")],
            )
            .expect("insert");
        assert_eq!(changed, 1);
        conn.close().expect("close");
    }

    let conn = Connection::open(&path).expect("reopen database");
    let val = conn
        .query_row(
            "SELECT val FROM t WHERE id = ?1",
            params![Value::Integer(1)],
            |stmt| Ok(stmt.column_text(0)),
        )
        .expect("query");
    assert_eq!(val, "persisted");
    conn.close().expect("close");
}
