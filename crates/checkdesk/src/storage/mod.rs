//! Storage layer for the check-in log.
//!
//! The log is an embedded `SQLite` database with one table of check-in
//! events. It is strictly append-only: an append inserts a single row and
//! never reads or rewrites prior rows, so the cost per check-in stays O(1)
//! and restarts pick up the full history. There are no update or delete
//! operations.

pub mod migrations;
pub mod schema;

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::checkin::{timestamp, CheckinEvent};
use crate::error::{Error, Result};

/// Durable, append-only store of check-in events.
///
/// Single-writer by design: the kiosk is a single interactive station. WAL
/// mode keeps concurrent readers (a `status` invocation while the kiosk
/// runs) safe.
#[derive(Debug)]
pub struct CheckinLog {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl CheckinLog {
    /// Open or create the check-in database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist,
    /// and initializes the schema on a fresh database. A missing prior log is
    /// therefore not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema
    /// initialization fails.
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

        debug!("Opening check-in database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        // WAL keeps a concurrent reader safe while the kiosk appends
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        migrations::initialize_schema(&conn)?;

        info!("Check-in database opened at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory log for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

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

    /// Append one check-in event and return its assigned id.
    ///
    /// No uniqueness is enforced: repeated check-ins by the same identifier
    /// are recorded as separate rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails; nothing is written in that case
    /// and prior rows are untouched.
    pub fn append(&self, event: &CheckinEvent) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO checkins (dni, nombre, checkin) VALUES (?1, ?2, ?3)",
            params![event.dni, event.nombre, event.timestamp_str()],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!(dni = %event.dni, "appended check-in with id {}", id);
        Ok(id)
    }

    /// Get all events in insertion order (oldest first).
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn all(&self) -> Result<Vec<CheckinEvent>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, dni, nombre, checkin FROM checkins ORDER BY id ASC",
        )?;

        let events = stmt
            .query_map([], Self::row_to_event)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(events)
    }

    /// Get the most recent events, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn recent(&self, limit: usize) -> Result<Vec<CheckinEvent>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, dni, nombre, checkin FROM checkins ORDER BY id DESC LIMIT ?1",
        )?;

        let limit_i64 = i64::try_from(limit).unwrap_or(i64::MAX);
        let events = stmt
            .query_map([limit_i64], Self::row_to_event)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(events)
    }

    /// Get the most recent events for one identifier, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn by_dni(&self, dni: &str, limit: usize) -> Result<Vec<CheckinEvent>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, dni, nombre, checkin FROM checkins WHERE dni = ?1 ORDER BY id DESC LIMIT ?2",
        )?;

        let limit_i64 = i64::try_from(limit).unwrap_or(i64::MAX);
        let events = stmt
            .query_map(params![dni, limit_i64], Self::row_to_event)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(events)
    }

    /// Count total events in the log.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM checkins", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Get log statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn stats(&self) -> Result<LogStats> {
        let total_events = self.count()?;

        let (first, last): (Option<String>, Option<String>) = self
            .conn
            .query_row(
                "SELECT MIN(checkin), MAX(checkin) FROM checkins",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?
            .unwrap_or((None, None));

        let first_checkin = first.and_then(|s| timestamp::parse(&s).ok());
        let last_checkin = last.and_then(|s| timestamp::parse(&s).ok());

        let db_size_bytes = if self.path.to_string_lossy() == ":memory:" {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(LogStats {
            total_events,
            first_checkin,
            last_checkin,
            db_size_bytes,
        })
    }

    /// Convert a database row to a `CheckinEvent`.
    fn row_to_event(row: &rusqlite::Row) -> rusqlite::Result<CheckinEvent> {
        let id: i64 = row.get(0)?;
        let dni: String = row.get(1)?;
        let nombre: String = row.get(2)?;
        let checkin: String = row.get(3)?;

        let ts = timestamp::parse(&checkin).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                3,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })?;

        let mut event = CheckinEvent::at(dni, nombre, ts);
        event.id = Some(id);
        Ok(event)
    }
}

/// Statistics about the check-in log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogStats {
    /// Total number of events recorded.
    pub total_events: i64,
    /// Timestamp of the earliest check-in.
    pub first_checkin: Option<NaiveDateTime>,
    /// Timestamp of the latest check-in.
    pub last_checkin: Option<NaiveDateTime>,
    /// Size of the database file in bytes.
    pub db_size_bytes: u64,
}
