//! Storage layer for rollcall.
//!
//! This module provides the string-keyed key-value store that backs all
//! persistent state: the admin credential, the session token, and the
//! student list. Values are serialized JSON text.
//!
//! The [`KeyValueStore`] trait is the seam between the domain components and
//! the actual storage: production code uses [`SqliteStore`], tests use
//! [`MemoryStore`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Storage key for the admin credential record.
pub const ADMIN_KEY: &str = "admin";

/// Storage key for the session token.
pub const TOKEN_KEY: &str = "token";

/// Storage key for the student list.
pub const STUDENTS_KEY: &str = "students";

/// A minimal string-keyed key-value store.
///
/// All operations are synchronous and blocking; an operation either completes
/// or returns a storage error. There is no cross-process coordination:
/// concurrent writers to the same backing store clobber each other, last
/// write wins.
pub trait KeyValueStore {
    /// Get the value stored under `key`, or `None` if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails. Absence of the key is
    /// not an error.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, overwriting any existing value.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the value stored under `key`. Removing an absent key is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    fn remove(&self, key: &str) -> Result<()>;
}

/// `SQLite`-backed key-value store.
///
/// A single `kv` table holds every entry, key to serialized text.
#[derive(Debug)]
pub struct SqliteStore {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl SqliteStore {
    /// Open or create a store database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the schema
    /// cannot be initialized.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::StorageOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        Self::initialize_schema(&conn)?;

        info!("Database opened successfully at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory store instance for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::StorageOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        Self::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn initialize_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            r"
            CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            r"
            INSERT INTO kv (key, value) VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            ",
            params![key, value],
        )?;
        debug!("Stored value under key '{}'", key);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.conn.execute("DELETE FROM kv WHERE key = ?1", [key])?;
        debug!("Removed key '{}'", key);
        Ok(())
    }
}

/// In-memory key-value store for tests.
///
/// Backed by a `RefCell<HashMap>`; not thread-safe, which matches the
/// single-threaded execution model of the rest of the crate.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Check whether the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_store_set_and_get() {
        let store = SqliteStore::open_in_memory().unwrap();

        store.set("token", "12341234").unwrap();
        assert_eq!(store.get("token").unwrap(), Some("12341234".to_string()));
    }

    #[test]
    fn test_sqlite_store_get_absent_key() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn test_sqlite_store_set_overwrites() {
        let store = SqliteStore::open_in_memory().unwrap();

        store.set("admin", "first").unwrap();
        store.set("admin", "second").unwrap();
        assert_eq!(store.get("admin").unwrap(), Some("second".to_string()));
    }

    #[test]
    fn test_sqlite_store_remove() {
        let store = SqliteStore::open_in_memory().unwrap();

        store.set("token", "12341234").unwrap();
        store.remove("token").unwrap();
        assert_eq!(store.get("token").unwrap(), None);
    }

    #[test]
    fn test_sqlite_store_remove_absent_key_is_noop() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(store.remove("missing").is_ok());
    }

    #[test]
    fn test_sqlite_store_in_memory_path() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert_eq!(store.path(), Path::new(":memory:"));
    }

    #[test]
    fn test_memory_store_set_and_get() {
        let store = MemoryStore::new();

        store.set("students", "[]").unwrap();
        assert_eq!(store.get("students").unwrap(), Some("[]".to_string()));
    }

    #[test]
    fn test_memory_store_remove() {
        let store = MemoryStore::new();

        store.set("admin", "{}").unwrap();
        assert_eq!(store.len(), 1);

        store.remove("admin").unwrap();
        assert!(store.is_empty());
        assert_eq!(store.get("admin").unwrap(), None);
    }

    #[test]
    fn test_memory_store_overwrite_keeps_single_entry() {
        let store = MemoryStore::new();

        store.set("token", "a").unwrap();
        store.set("token", "b").unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("token").unwrap(), Some("b".to_string()));
    }
}
