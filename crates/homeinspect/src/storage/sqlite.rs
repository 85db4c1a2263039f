//! `SQLite`-backed record store.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, ErrorCode};
use tracing::{debug, info, warn};

use super::schema::ENTRY_COLUMNS;
use super::{check_storable, migrations, RecordStore};
use crate::entry::{Checklist, EntryId, InspectionEntry, NewEntry, PhotoRef};
use crate::error::{Error, Result};

const MEMORY_PATH: &str = ":memory:";

/// Durable record store in a single `SQLite` file.
///
/// The connection sits behind a mutex, so one store can be shared between
/// threads; appends and reads never interleave.
#[derive(Debug)]
pub struct SqliteStore {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create a store at the given path and initialize it.
    ///
    /// Creates the parent directories and database file if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StoreUnavailable`] if the directory or file cannot be
    /// opened, and [`Error::CorruptState`] if the file is not a usable
    /// database.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|source| Error::store_unavailable(parent, source))?;
            }
        }

        debug!("Opening record store at {}", path.display());
        let conn =
            Connection::open(&path).map_err(|source| Error::store_unavailable(&path, source))?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=FULL;")
            .map_err(|source| open_error(&path, source))?;

        let store = Self {
            path,
            conn: Mutex::new(conn),
        };
        store.initialize()?;

        info!("Record store opened at {}", store.path.display());
        Ok(store)
    }

    /// Create an in-memory store, mostly for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|source| Error::store_unavailable(MEMORY_PATH, source))?;

        let store = Self {
            path: PathBuf::from(MEMORY_PATH),
            conn: Mutex::new(conn),
        };
        store.initialize()?;
        Ok(store)
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get store statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be read or holds
    /// undecodable timestamps.
    pub fn stats(&self) -> Result<StoreStats> {
        let conn = self.lock()?;

        let (total_entries, distinct_rooms): (i64, i64) = conn
            .query_row(
                "SELECT COUNT(*), COUNT(DISTINCT room) FROM entries",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .map_err(read_error)?;

        // Appends keep years within 0000-9999 and always write nanoseconds,
        // so the text form has a fixed width and sorts in time order.
        let (oldest, newest): (Option<String>, Option<String>) = conn
            .query_row(
                "SELECT MIN(timestamp), MAX(timestamp) FROM entries",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .map_err(read_error)?;
        drop(conn);

        let db_size_bytes = if self.path.as_os_str() == MEMORY_PATH {
            0
        } else {
            std::fs::metadata(&self.path).map_or(0, |m| m.len())
        };

        Ok(StoreStats {
            total_entries: usize::try_from(total_entries).unwrap_or(usize::MAX),
            distinct_rooms: usize::try_from(distinct_rooms).unwrap_or(usize::MAX),
            oldest_entry: oldest.as_deref().map(decode_timestamp).transpose()?,
            newest_entry: newest.as_deref().map(decode_timestamp).transpose()?,
            db_size_bytes,
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| Error::internal("record store lock poisoned"))
    }

    fn query_entries(&self) -> Result<Vec<InspectionEntry>> {
        let conn = self.lock()?;
        let sql = format!("SELECT {ENTRY_COLUMNS} FROM entries ORDER BY seq ASC");
        let mut stmt = conn.prepare(&sql).map_err(read_error)?;

        let rows = stmt
            .query_map([], RawEntry::from_row)
            .map_err(read_error)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(read_error)?;

        rows.into_iter().map(RawEntry::decode).collect()
    }
}

impl RecordStore for SqliteStore {
    fn initialize(&self) -> Result<()> {
        let conn = self.lock()?;

        migrations::initialize_schema(&conn).map_err(|err| match err {
            Error::DatabaseQuery(source) => open_error(&self.path, source),
            other => other,
        })?;

        let integrity: String = conn
            .query_row("PRAGMA quick_check", [], |row| row.get(0))
            .map_err(|source| open_error(&self.path, source))?;
        if integrity != "ok" {
            warn!("Integrity check failed for {}: {integrity}", self.path.display());
            return Err(Error::corrupt_state(format!(
                "integrity check failed: {integrity}"
            )));
        }

        Ok(())
    }

    fn append(&self, entry: NewEntry) -> Result<InspectionEntry> {
        let entry = entry.into_entry(Utc::now);
        check_storable(&entry)?;
        let checklist = entry
            .checklist
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(Error::persistence)?;

        let mut conn = self
            .conn
            .lock()
            .map_err(|_| Error::persistence("record store lock poisoned"))?;
        let tx = conn.transaction().map_err(Error::persistence)?;
        tx.execute(
            r"
            INSERT INTO entries (id, room, photo, notes, timestamp, checklist)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ",
            params![
                entry.id.as_str(),
                entry.room,
                entry.photo.as_ref().map(PhotoRef::as_str),
                entry.notes,
                encode_timestamp(&entry.timestamp),
                checklist,
            ],
        )
        .map_err(Error::persistence)?;
        tx.commit().map_err(Error::persistence)?;

        debug!("Appended entry {} for room {:?}", entry.id, entry.room);
        Ok(entry)
    }

    fn list_all(&self) -> Result<Vec<InspectionEntry>> {
        self.query_entries()
    }

    fn count(&self) -> Result<usize> {
        let count: i64 = self
            .lock()?
            .query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))
            .map_err(read_error)?;
        Ok(usize::try_from(count).unwrap_or(usize::MAX))
    }

    fn rooms(&self) -> Result<Vec<String>> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare("SELECT room FROM entries GROUP BY room ORDER BY MIN(seq)")
            .map_err(read_error)?;
        let rooms = stmt
            .query_map([], |row| row.get(0))
            .map_err(read_error)?
            .collect::<std::result::Result<Vec<String>, _>>()
            .map_err(read_error)?;
        Ok(rooms)
    }
}

/// Statistics about the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStats {
    /// Total number of entries stored.
    pub total_entries: usize,
    /// Number of distinct room labels.
    pub distinct_rooms: usize,
    /// Timestamp of the oldest entry.
    pub oldest_entry: Option<DateTime<Utc>>,
    /// Timestamp of the newest entry.
    pub newest_entry: Option<DateTime<Utc>>,
    /// Size of the database file in bytes.
    pub db_size_bytes: u64,
}

/// Columns of one `entries` row before validation.
struct RawEntry {
    seq: i64,
    id: String,
    room: String,
    photo: Option<String>,
    notes: Option<String>,
    timestamp: String,
    checklist: Option<String>,
}

impl RawEntry {
    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            seq: row.get(0)?,
            id: row.get(1)?,
            room: row.get(2)?,
            photo: row.get(3)?,
            notes: row.get(4)?,
            timestamp: row.get(5)?,
            checklist: row.get(6)?,
        })
    }

    fn decode(self) -> Result<InspectionEntry> {
        if self.id.is_empty() {
            return Err(Error::corrupt_state(format!(
                "entry #{} has an empty id",
                self.seq
            )));
        }

        let timestamp = decode_timestamp(&self.timestamp).map_err(|_| {
            Error::corrupt_state(format!(
                "entry {} has an unreadable timestamp {:?}",
                self.id, self.timestamp
            ))
        })?;

        let checklist = self
            .checklist
            .map(|raw| serde_json::from_str::<Checklist>(&raw))
            .transpose()
            .map_err(|err| {
                Error::corrupt_state(format!("entry {} has an unreadable checklist: {err}", self.id))
            })?;

        Ok(InspectionEntry {
            id: EntryId::from(self.id),
            room: self.room,
            photo: self.photo.map(PhotoRef::new),
            notes: self.notes,
            timestamp,
            checklist,
        })
    }
}

fn encode_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn decode_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| Error::corrupt_state(format!("unreadable timestamp {raw:?}: {err}")))
}

fn is_corruption(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(failure, _) => matches!(
            failure.code,
            ErrorCode::NotADatabase | ErrorCode::DatabaseCorrupt
        ),
        rusqlite::Error::InvalidColumnType(..)
        | rusqlite::Error::FromSqlConversionFailure(..)
        | rusqlite::Error::IntegralValueOutOfRange(..) => true,
        _ => false,
    }
}

/// Classify a failure while opening or initializing the medium.
fn open_error(path: &Path, source: rusqlite::Error) -> Error {
    if is_corruption(&source) {
        warn!("Record store at {} is corrupt: {source}", path.display());
        Error::corrupt_state(format!("{}: {source}", path.display()))
    } else {
        Error::store_unavailable(path, source)
    }
}

/// Classify a failure while reading entries.
fn read_error(source: rusqlite::Error) -> Error {
    if is_corruption(&source) {
        warn!("Unreadable entry data: {source}");
        Error::corrupt_state(source.to_string())
    } else {
        Error::DatabaseQuery(source)
    }
}
