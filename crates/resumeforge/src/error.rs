//! Error types for resumeforge.
//!
//! This module defines all error types used throughout the resumeforge crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for resumeforge operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Editing Errors ===
    /// The named section does not exist.
    #[error("unknown section '{name}' (expected education, experience, projects or achievements)")]
    UnknownSection {
        /// The name that was given.
        name: String,
    },

    /// The named field does not exist on the target.
    #[error("unknown field '{field}' for {target}")]
    UnknownField {
        /// What the field was addressed on (e.g. "personal", "education").
        target: &'static str,
        /// The field name that was given.
        field: String,
    },

    /// An entry index is past the end of its collection.
    #[error("{section} entry {index} is out of range (collection has {len} entries)")]
    EntryOutOfRange {
        /// Section the index was applied to.
        section: &'static str,
        /// The requested index.
        index: usize,
        /// Current collection length.
        len: usize,
    },

    /// The named template does not exist.
    #[error("unknown template '{name}' (expected classic, modern or minimal)")]
    UnknownTemplate {
        /// The name that was given.
        name: String,
    },

    // === Export Errors ===
    /// An export is already running.
    #[error("an export is already in progress")]
    ExportInProgress,

    /// The document exporter failed.
    #[error("export failed: {0}")]
    Export(String),

    /// An operation timed out.
    #[error("operation timed out: {operation}")]
    Timeout {
        /// Description of the operation that timed out.
        operation: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for resumeforge operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new export error.
    #[must_use]
    pub fn export(message: impl Into<String>) -> Self {
        Self::Export(message.into())
    }

    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create an unknown field error.
    #[must_use]
    pub fn unknown_field(target: &'static str, field: impl Into<String>) -> Self {
        Self::UnknownField {
            target,
            field: field.into(),
        }
    }

    /// Create a configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Check if this error came out of the export path.
    #[must_use]
    pub fn is_export_error(&self) -> bool {
        matches!(
            self,
            Self::Export(_) | Self::ExportInProgress | Self::Timeout { .. }
        )
    }

    /// Check if this error was caused by bad editing input rather than the environment.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownSection { .. }
                | Self::UnknownField { .. }
                | Self::EntryOutOfRange { .. }
                | Self::UnknownTemplate { .. }
        )
    }
}
