//! Process-local record store.

use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use tracing::debug;

use super::{check_storable, RecordStore};
use crate::entry::{InspectionEntry, NewEntry};
use crate::error::{Error, Result};

/// Record store that keeps entries in memory.
///
/// Contents are lost when the store is dropped. Useful for tests and for
/// embedding the compiler without touching disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<Vec<InspectionEntry>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<InspectionEntry>>> {
        self.entries
            .lock()
            .map_err(|_| Error::internal("record store lock poisoned"))
    }
}

impl RecordStore for MemoryStore {
    fn initialize(&self) -> Result<()> {
        Ok(())
    }

    fn append(&self, entry: NewEntry) -> Result<InspectionEntry> {
        let entry = entry.into_entry(Utc::now);
        check_storable(&entry)?;
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| Error::persistence("record store lock poisoned"))?;

        if entries.iter().any(|existing| existing.id == entry.id) {
            return Err(Error::persistence(format!(
                "an entry with id {} already exists",
                entry.id
            )));
        }

        entries.push(entry.clone());
        debug!("Appended entry {} for room {:?}", entry.id, entry.room);
        Ok(entry)
    }

    fn list_all(&self) -> Result<Vec<InspectionEntry>> {
        Ok(self.lock()?.clone())
    }

    fn count(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_is_empty() {
        let store = MemoryStore::new();
        assert_eq!(store.count().unwrap(), 0);
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_id_message() {
        let store = MemoryStore::new();
        store.append(NewEntry::new("Hall").with_id("x")).unwrap();

        let err = store.append(NewEntry::new("Hall").with_id("x")).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_poisoned_lock_fails_append_as_persistence() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let holder = std::sync::Arc::clone(&store);
        let _ = std::thread::spawn(move || {
            let _guard = holder.entries.lock().unwrap();
            panic!("writer died while holding the lock");
        })
        .join();

        let err = store.append(NewEntry::new("Hall")).unwrap_err();
        assert!(err.is_persistence_error(), "{err}");
    }

    #[test]
    fn test_list_all_returns_snapshot() {
        let store = MemoryStore::new();
        store.append(NewEntry::new("Hall")).unwrap();
        let snapshot = store.list_all().unwrap();
        store.append(NewEntry::new("Kitchen")).unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.count().unwrap(), 2);
    }
}
