//! Record store for homeinspect.
//!
//! Inspection entries live behind the [`RecordStore`] trait. [`SqliteStore`]
//! is the durable medium used by the CLI; [`MemoryStore`] keeps everything in
//! process memory. [`StoreHandle`] exposes either as awaitable operations.
//!
//! Every store preserves append order, serializes access through a single
//! lock, and either commits a write completely or leaves state untouched.

mod handle;
mod memory;
pub mod migrations;
pub mod schema;
mod sqlite;

pub use handle::StoreHandle;
pub use memory::MemoryStore;
pub use sqlite::{SqliteStore, StoreStats};

use chrono::Datelike;

use crate::entry::{InspectionEntry, NewEntry};
use crate::error::{Error, Result};

/// Years a stored timestamp may fall in.
///
/// Outside this range the RFC 3339 text form gains a sign and an extra
/// digit, which neither parses back nor sorts with the rest.
const STORABLE_YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

/// Reject an entry whose timestamp cannot be stored and read back.
fn check_storable(entry: &InspectionEntry) -> Result<()> {
    let year = entry.timestamp.year();
    if STORABLE_YEARS.contains(&year) {
        Ok(())
    } else {
        Err(Error::persistence(format!(
            "timestamp year {year} of entry {} is outside {}..={}",
            entry.id,
            STORABLE_YEARS.start(),
            STORABLE_YEARS.end()
        )))
    }
}

/// Durable, ordered collection of inspection entries.
///
/// Entries can only be appended and read back. There is no update or
/// delete.
pub trait RecordStore: Send + Sync {
    /// Prepare the medium for use.
    ///
    /// Idempotent: calling it again never loses data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StoreUnavailable`](crate::Error::StoreUnavailable) if
    /// the medium cannot be opened and
    /// [`Error::CorruptState`](crate::Error::CorruptState) if its contents
    /// cannot be understood.
    fn initialize(&self) -> Result<()>;

    /// Store a new entry, assigning its id and timestamp when unset.
    ///
    /// Returns the entry exactly as later reads will return it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persistence`](crate::Error::Persistence) if the write
    /// does not complete, including when the id is already taken or the
    /// timestamp lies outside years 0 to 9999. The store is unchanged in
    /// that case.
    fn append(&self, entry: NewEntry) -> Result<InspectionEntry>;

    /// Every stored entry, in append order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptState`](crate::Error::CorruptState) if any
    /// stored entry cannot be decoded. No partial result is returned.
    fn list_all(&self) -> Result<Vec<InspectionEntry>>;

    /// Entries whose room equals `room` exactly, in append order.
    ///
    /// # Errors
    ///
    /// Same as [`list_all`](Self::list_all).
    fn list_by_room(&self, room: &str) -> Result<Vec<InspectionEntry>> {
        Ok(self
            .list_all()?
            .into_iter()
            .filter(|entry| entry.room == room)
            .collect())
    }

    /// Number of stored entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium cannot be read.
    fn count(&self) -> Result<usize> {
        Ok(self.list_all()?.len())
    }

    /// Distinct room labels, in order of first appearance.
    ///
    /// # Errors
    ///
    /// Same as [`list_all`](Self::list_all).
    fn rooms(&self) -> Result<Vec<String>> {
        let mut rooms: Vec<String> = Vec::new();
        for entry in self.list_all()? {
            if !rooms.contains(&entry.room) {
                rooms.push(entry.room);
            }
        }
        Ok(rooms)
    }
}
