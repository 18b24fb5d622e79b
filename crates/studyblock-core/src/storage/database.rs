//! SQLite-backed key-value storage.
//!
//! Studyblock keeps all persistent state (session history, saved engine
//! snapshots) as JSON values in a single kv table.

use rusqlite::{params, Connection};

use super::data_dir;
use crate::error::{DatabaseError, Result};

/// SQLite database holding the kv store.
#[derive(Debug)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `~/.config/studyblock/studyblock.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the data directory or database cannot be
    /// opened or migrated.
    pub fn open() -> Result<Self> {
        Ok(Self::open_at(&data_dir()?.join("studyblock.db"))?)
    }

    /// Open a database at an explicit path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &std::path::Path) -> Result<Self, DatabaseError> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Remove a value from the kv store.
    pub fn kv_delete(&self, key: &str) -> Result<(), DatabaseError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kv_store() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("test").unwrap().is_none());
        db.kv_set("test", "hello").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "hello");
        db.kv_set("test", "world").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "world");
    }

    #[test]
    fn kv_delete_removes_key() {
        let db = Database::open_memory().unwrap();
        db.kv_set("gone", "soon").unwrap();
        db.kv_delete("gone").unwrap();
        assert!(db.kv_get("gone").unwrap().is_none());
    }

    #[test]
    fn open_at_missing_parent_reports_open_failed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("studyblock.db");
        let err = Database::open_at(&path).unwrap_err();
        match err {
            DatabaseError::OpenFailed { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("expected OpenFailed, got {other:?}"),
        }
    }
}
