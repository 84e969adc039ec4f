//! Storage layer for resumeforge.
//!
//! A small `SQLite` key/value store with `localStorage`-like operations, and
//! [`ResumeStore`], which keeps the record as JSON under a fixed key.

pub mod migrations;
mod resume_store;
pub mod schema;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::error::{Error, Result};

pub use resume_store::{ResumeStore, STORAGE_KEY};

const IN_MEMORY: &str = ":memory:";

/// Persistent key/value store.
#[derive(Debug)]
pub struct Storage {
    path: PathBuf,
    conn: Connection,
}

impl Storage {
    /// Open or create a storage database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        migrations::initialize_schema(&conn)?;

        info!("Storage opened at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory store, used by tests.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(IN_MEMORY),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(IN_MEMORY),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Store `value` under `key`.
    ///
    /// Returns `false` without writing when the stored value is unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn set_item(&self, key: &str, value: &str) -> Result<bool> {
        let hash = blake3::hash(value.as_bytes()).to_hex().to_string();

        let stored: Option<String> = self
            .conn
            .query_row(
                "SELECT content_hash FROM local_storage WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()?;

        if stored.as_deref() == Some(hash.as_str()) {
            debug!("Skipping unchanged write to '{}' ({})", key, &hash[..16]);
            return Ok(false);
        }

        self.conn.execute(
            r"
            INSERT INTO local_storage (key, value, content_hash, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                content_hash = excluded.content_hash,
                updated_at = excluded.updated_at
            ",
            params![key, value, hash, Utc::now().to_rfc3339()],
        )?;

        debug!("Stored {} bytes under '{}'", value.len(), key);
        Ok(true)
    }

    /// Remove `key`. Returns whether anything was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn remove_item(&self, key: &str) -> Result<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM local_storage WHERE key = ?1", [key])?;
        Ok(removed > 0)
    }

    /// All keys, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn keys(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM local_storage ORDER BY key")?;
        let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(keys)
    }

    /// Number of stored items.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn count(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM local_storage", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Get storage statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn stats(&self) -> Result<StorageStats> {
        let items = self.count()?;

        let newest: Option<String> = self
            .conn
            .query_row(
                "SELECT updated_at FROM local_storage ORDER BY updated_at DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;

        let last_updated = newest
            .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
            .map(|dt| dt.with_timezone(&Utc));

        let db_size_bytes = if self.path.as_os_str() == IN_MEMORY {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(StorageStats {
            items,
            last_updated,
            db_size_bytes,
        })
    }
}

/// Summary of what the store holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageStats {
    /// Number of stored keys.
    pub items: i64,
    /// Time of the most recent write.
    pub last_updated: Option<DateTime<Utc>>,
    /// Database file size (0 for in-memory stores).
    pub db_size_bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_storage() -> Storage {
        Storage::open_in_memory().expect("failed to create test storage")
    }

    fn temp_db(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("resumeforge_storage_{}_{name}", std::process::id()))
            .join("storage.db")
    }

    #[test]
    fn test_open_in_memory() {
        let storage = create_test_storage();
        assert_eq!(storage.path(), Path::new(":memory:"));
        assert_eq!(storage.count().unwrap(), 0);
    }

    #[test]
    fn test_get_missing_item() {
        let storage = create_test_storage();
        assert!(storage.get_item("nothing").unwrap().is_none());
    }

    #[test]
    fn test_set_and_get_item() {
        let storage = create_test_storage();

        assert!(storage.set_item("k", "v1").unwrap());
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v1"));

        assert!(storage.set_item("k", "v2").unwrap());
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(storage.count().unwrap(), 1);
    }

    #[test]
    fn test_unchanged_write_is_skipped() {
        let storage = create_test_storage();

        assert!(storage.set_item("k", "same").unwrap());
        assert!(!storage.set_item("k", "same").unwrap());
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("same"));
    }

    #[test]
    fn test_same_value_under_two_keys() {
        let storage = create_test_storage();

        assert!(storage.set_item("a", "x").unwrap());
        assert!(storage.set_item("b", "x").unwrap());
        assert_eq!(storage.keys().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_remove_item() {
        let storage = create_test_storage();
        storage.set_item("k", "v").unwrap();

        assert!(storage.remove_item("k").unwrap());
        assert!(!storage.remove_item("k").unwrap());
        assert!(storage.get_item("k").unwrap().is_none());
    }

    #[test]
    fn test_unicode_value() {
        let storage = create_test_storage();
        let value = "Zoë • 日本語 • 🚀";
        storage.set_item("k", value).unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some(value));
    }

    #[test]
    fn test_stats_empty() {
        let storage = create_test_storage();
        let stats = storage.stats().unwrap();

        assert_eq!(stats.items, 0);
        assert!(stats.last_updated.is_none());
        assert_eq!(stats.db_size_bytes, 0);
    }

    #[test]
    fn test_stats_with_data() {
        let storage = create_test_storage();
        storage.set_item("a", "1").unwrap();
        storage.set_item("b", "2").unwrap();

        let stats = storage.stats().unwrap();
        assert_eq!(stats.items, 2);
        assert!(stats.last_updated.is_some());
    }

    #[test]
    fn test_open_creates_parent_dirs_and_persists() {
        let path = temp_db("persist");
        let dir = path.parent().unwrap().to_path_buf();
        let _ = std::fs::remove_dir_all(&dir);

        {
            let storage = Storage::open(&path).unwrap();
            storage.set_item("k", "v").unwrap();
        }
        assert!(path.exists());

        let storage = Storage::open(&path).unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v"));
        assert!(storage.stats().unwrap().db_size_bytes > 0);

        drop(storage);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
