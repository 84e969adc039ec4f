//! `SQLite` schema for the key-value store.

/// Key-value table backing [`super::Storage`].
///
/// `content_hash` lets writes of an unchanged value be skipped.
pub const CREATE_LOCAL_STORAGE_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS local_storage (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    content_hash TEXT NOT NULL,
    updated_at TEXT NOT NULL
)
";

/// Index used by [`super::Storage::stats`] to find the latest write.
pub const CREATE_UPDATED_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_local_storage_updated ON local_storage(updated_at DESC)
";

/// Internal bookkeeping, currently only the schema version.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    CREATE_LOCAL_STORAGE_TABLE,
    CREATE_UPDATED_INDEX,
    CREATE_METADATA_TABLE,
];
