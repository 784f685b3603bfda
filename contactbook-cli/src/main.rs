//! Sequential walkthrough of the contact store.
//!
//! Starts from a clean slate, opens (creating) the database file, creates
//! the `Contact` table, inserts a fixed set of rows through one reused
//! prepared statement, queries everything back printing each row as
//! `id | name`, and closes the connection.
//!
//! Every failure except the initial open is reported and the walkthrough
//! continues; a failed open terminates the run.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use contactbook_core::{Contact, ContactBook};
use eyre::WrapErr;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Database file, created in the working directory.
const DB_PATH: &str = "contactbook.sqlite";

fn demo_contacts() -> Vec<Contact> {
    vec![
        Contact::new(1, "Ray"),
        Contact::new(2, "Emma"),
        Contact::new(3, "Andrew"),
        Contact::new(4, "Chris"),
    ]
}

fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("contactbook=warn")),
        )
        .init();

    let path = Path::new(DB_PATH);

    // Clean slate: every run exercises the same script from scratch. This
    // is walkthrough setup, not part of the open contract.
    if let Err(err) = fs::remove_file(path) {
        if err.kind() != ErrorKind::NotFound {
            return Err(err).wrap_err_with(|| format!("could not remove {DB_PATH}"));
        }
    }
    debug!(path = DB_PATH, "starting walkthrough");

    let book = match ContactBook::open(path) {
        Ok(book) => {
            println!("Opened connection to {DB_PATH}.");
            book
        }
        Err(err) => {
            return Err(err).wrap_err_with(|| format!("could not open {DB_PATH}"));
        }
    };

    match book.create_table() {
        Ok(()) => println!("Contact table created."),
        Err(err) => println!("Contact table could not be created: {err}"),
    }

    match book.insert_contacts(&demo_contacts()) {
        Ok(outcomes) => {
            for outcome in outcomes {
                match outcome {
                    Ok(()) => println!("Successfully inserted row."),
                    Err(err) => println!("Could not insert row: {err}"),
                }
            }
        }
        Err(err) => println!("Insert statement could not be prepared: {err}"),
    }

    match book.query_all() {
        Ok(contacts) => {
            for row in contacts {
                match row {
                    Ok(contact) => println!("{contact}"),
                    Err(err) => println!("Could not read row: {err}"),
                }
            }
        }
        Err(err) => println!("Query could not be prepared: {err}"),
    }

    match book.close() {
        Ok(()) => println!("Closed connection."),
        Err(err) => println!("Connection could not be closed: {err}"),
    }

    Ok(())
}
