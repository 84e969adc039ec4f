//! Schema versioning for the storage database.
//!
//! The version lives in the `metadata` table. Opening a database created by
//! a newer build is refused instead of silently downgrading it.

use rusqlite::Connection;

use crate::error::{Error, Result};

use super::schema::SCHEMA_STATEMENTS;

/// The current schema version.
pub const CURRENT_VERSION: i32 = 1;

const VERSION_KEY: &str = "schema_version";

/// One step that takes the schema from `version - 1` to `version`.
struct Migration {
    version: i32,
    apply: fn(&Connection) -> Result<()>,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    apply: base_schema,
}];

/// Create the schema if needed and apply pending migrations.
///
/// # Errors
///
/// Returns an error if a statement fails, the stored version is unreadable,
/// or the database is newer than this build.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    for statement in SCHEMA_STATEMENTS {
        conn.execute(statement, [])?;
    }

    let version = schema_version(conn)?;
    if version > CURRENT_VERSION {
        return Err(Error::DatabaseMigration {
            message: format!(
                "database schema version {version} is newer than supported version {CURRENT_VERSION}"
            ),
        });
    }

    for migration in MIGRATIONS.iter().filter(|m| m.version > version) {
        (migration.apply)(conn)?;
        set_schema_version(conn, migration.version)?;
        tracing::debug!("Applied storage migration v{}", migration.version);
    }

    Ok(())
}

/// Stored schema version, or 0 for a fresh database.
pub fn schema_version(conn: &Connection) -> Result<i32> {
    let result: std::result::Result<String, rusqlite::Error> = conn.query_row(
        "SELECT value FROM metadata WHERE key = ?1",
        [VERSION_KEY],
        |row| row.get(0),
    );

    match result {
        Ok(value) => value.parse().map_err(|_| Error::DatabaseMigration {
            message: format!("invalid schema version: {value}"),
        }),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(e) => Err(e.into()),
    }
}

fn set_schema_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
        (VERSION_KEY, version.to_string()),
    )?;
    Ok(())
}

/// Version 1 is what `SCHEMA_STATEMENTS` creates.
fn base_schema(_conn: &Connection) -> Result<()> {
    Ok(())
}
