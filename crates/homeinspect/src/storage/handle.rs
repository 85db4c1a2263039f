//! Awaitable access to a record store.

use std::sync::Arc;

use crate::entry::{InspectionEntry, NewEntry};
use crate::error::{Error, Result};

use super::RecordStore;

/// Shared handle that runs store operations on tokio's blocking pool.
///
/// Store I/O may block, so each call is moved off the async executor.
/// Dropping a returned future does not interrupt a write already running;
/// the write commits or fails as a whole.
#[derive(Debug)]
pub struct StoreHandle<S> {
    store: Arc<S>,
}

impl<S> Clone for StoreHandle<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: RecordStore + 'static> StoreHandle<S> {
    /// Wrap a store.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Borrow the underlying store for synchronous use.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Awaitable [`RecordStore::initialize`].
    ///
    /// # Errors
    ///
    /// Propagates the store's error, or [`Error::Internal`] if the blocking
    /// task panicked.
    pub async fn initialize(&self) -> Result<()> {
        self.run(|store| store.initialize()).await
    }

    /// Awaitable [`RecordStore::append`].
    ///
    /// # Errors
    ///
    /// Propagates the store's error, or [`Error::Internal`] if the blocking
    /// task panicked.
    pub async fn append(&self, entry: NewEntry) -> Result<InspectionEntry> {
        self.run(move |store| store.append(entry)).await
    }

    /// Awaitable [`RecordStore::list_all`].
    ///
    /// # Errors
    ///
    /// Propagates the store's error, or [`Error::Internal`] if the blocking
    /// task panicked.
    pub async fn list_all(&self) -> Result<Vec<InspectionEntry>> {
        self.run(|store| store.list_all()).await
    }

    /// Awaitable [`RecordStore::list_by_room`].
    ///
    /// # Errors
    ///
    /// Propagates the store's error, or [`Error::Internal`] if the blocking
    /// task panicked.
    pub async fn list_by_room(&self, room: impl Into<String>) -> Result<Vec<InspectionEntry>> {
        let room = room.into();
        self.run(move |store| store.list_by_room(&room)).await
    }

    async fn run<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&S) -> Result<T> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || op(&*store))
            .await
            .map_err(|err| Error::internal(format!("store task failed: {err}")))?
    }
}
