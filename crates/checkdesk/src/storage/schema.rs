//! `SQLite` schema definitions for the check-in log.

/// SQL statement to create the checkins table.
pub const CREATE_CHECKINS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS checkins (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    dni TEXT NOT NULL,
    nombre TEXT NOT NULL,
    checkin TEXT NOT NULL
)
";

/// SQL statement to create an index on `dni` for per-participant queries.
pub const CREATE_DNI_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_checkins_dni ON checkins(dni)
";

/// SQL statement to create an index on `checkin` for time-ordered queries.
pub const CREATE_CHECKIN_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_checkins_checkin ON checkins(checkin)
";

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    CREATE_CHECKINS_TABLE,
    CREATE_DNI_INDEX,
    CREATE_CHECKIN_INDEX,
    CREATE_METADATA_TABLE,
];
