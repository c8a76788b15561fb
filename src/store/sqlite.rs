//! A record store persisted in a single SQLite table.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension};

use crate::{Error, store::RecordStore};

/// A [RecordStore] backed by a SQLite database.
///
/// All records live in one `record` table keyed by the storage key, so the
/// database mirrors a browser's local storage one row per key.
#[derive(Debug)]
pub struct SqliteStore {
    connection: Connection,
}

impl SqliteStore {
    /// Open (or create) the database file at `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or the table cannot be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let connection = Connection::open(path)?;
        Self::from_connection(connection)
    }

    /// Create a store in a private, in-memory database.
    ///
    /// # Errors
    /// Returns an error if the table cannot be created.
    pub fn open_in_memory() -> Result<Self, Error> {
        let connection = Connection::open_in_memory()?;
        Self::from_connection(connection)
    }

    /// Wrap an existing connection, creating the record table if needed.
    ///
    /// # Errors
    /// Returns an error if the table cannot be created.
    pub fn from_connection(connection: Connection) -> Result<Self, Error> {
        create_record_table(&connection)?;
        Ok(Self { connection })
    }
}

impl RecordStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        self.connection
            .prepare("SELECT value FROM record WHERE key = :key;")?
            .query_row(&[(":key", key)], |row| row.get(0))
            .optional()
            .map_err(|error| error.into())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        self.connection.execute(
            "INSERT INTO record (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
            (key, value),
        )?;

        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), Error> {
        self.connection
            .execute("DELETE FROM record WHERE key = ?1;", (key,))?;

        Ok(())
    }
}

fn create_record_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS record (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}
