//! `homeinspect` - Room-by-room inspection notes with paginated report export
//!
//! This library provides a durable record store for per-room inspection
//! entries and a deterministic compiler that lays those entries out as a
//! paginated document.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod document;
pub mod entry;
pub mod error;
pub mod logging;
pub mod storage;

pub use config::Config;
pub use document::{compile, Document, LayoutConfig};
pub use entry::{Checklist, EntryId, InspectionEntry, NewEntry, PhotoRef, SUGGESTED_ROOMS};
pub use error::{Error, Result};
pub use logging::init_logging;
pub use storage::{MemoryStore, RecordStore, SqliteStore, StoreHandle, StoreStats};
