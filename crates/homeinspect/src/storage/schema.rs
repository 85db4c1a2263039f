//! `SQLite` schema definitions for homeinspect.
//!
//! This module contains the SQL statements for creating and managing
//! the database schema.

/// SQL statement to create the entries table.
///
/// `seq` records append order; `id` is the caller-visible identifier.
pub const CREATE_ENTRIES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS entries (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    id TEXT NOT NULL UNIQUE,
    room TEXT NOT NULL,
    photo TEXT,
    notes TEXT,
    timestamp TEXT NOT NULL,
    checklist TEXT
)
";

/// SQL statement to create an index on `room` for filtering.
pub const CREATE_ROOM_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_entries_room ON entries(room)
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
    CREATE_ENTRIES_TABLE,
    CREATE_ROOM_INDEX,
    CREATE_METADATA_TABLE,
];

/// Column list shared by every entry query, in decoding order.
pub const ENTRY_COLUMNS: &str = "seq, id, room, photo, notes, timestamp, checklist";
