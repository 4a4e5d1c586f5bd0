//! Error types for checkdesk.
//!
//! This module defines the error taxonomy for the check-in workflow. Only
//! storage-class failures live here: an unknown identifier or a missing photo
//! is an ordinary outcome (`workflow::Submission::NotFound`,
//! `photo::PhotoStatus::Unavailable`), not an error.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for checkdesk operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the check-in database.
    #[error("failed to open check-in database at {path}: {source}")]
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

    // === Roster Errors ===
    /// The roster file exists but could not be read or parsed.
    #[error("failed to read roster at {path}: {source}")]
    Roster {
        /// Path to the roster file.
        path: PathBuf,
        /// The underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// Writing the tabular log export failed.
    #[error("failed to write export to {path}: {source}")]
    Export {
        /// Path of the export file.
        path: PathBuf,
        /// The underlying CSV error.
        #[source]
        source: csv::Error,
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
}

/// A specialized Result type for checkdesk operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a roster read error for the given path.
    #[must_use]
    pub fn roster(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Roster {
            path: path.into(),
            source,
        }
    }

    /// Create an export write error for the given path.
    #[must_use]
    pub fn export(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Export {
            path: path.into(),
            source,
        }
    }

    /// Check if this error is a configuration problem.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigLoad(_) | Self::ConfigValidation { .. })
    }
}
