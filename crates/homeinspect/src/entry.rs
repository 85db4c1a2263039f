//! Core inspection entry types for homeinspect.
//!
//! An [`InspectionEntry`] is one observation recorded for one room. Callers
//! build a [`NewEntry`] draft and hand it to a record store, which assigns the
//! identifier and timestamp and returns the stored entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Room labels offered to the user when starting an inspection.
///
/// These are suggestions only. Any string is a valid room.
pub const SUGGESTED_ROOMS: &[&str] = &[
    "Bedroom", "Bathroom", "Kitchen", "Hall", "Dining", "Balcony",
];

/// Opaque unique identifier of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the identifier as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for EntryId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for EntryId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reference to image data attached to an entry.
///
/// Usually a data URI or a file path. The core never looks inside it; a
/// renderer resolves it to image bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoRef(String);

impl PhotoRef {
    /// Wrap a reference string.
    #[must_use]
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// Borrow the reference as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Caller-defined checklist items, preserved verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Checklist(Vec<serde_json::Value>);

impl Checklist {
    /// Build a checklist from arbitrary JSON items.
    #[must_use]
    pub fn new(items: Vec<serde_json::Value>) -> Self {
        Self(items)
    }

    /// The items in caller order.
    #[must_use]
    pub fn items(&self) -> &[serde_json::Value] {
        &self.0
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the checklist has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Checklist {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|item| serde_json::Value::String(item.into()))
                .collect(),
        )
    }
}

/// A stored inspection entry.
///
/// Entries are immutable once stored: they are never updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectionEntry {
    /// Unique identifier.
    pub id: EntryId,

    /// Free-text room label.
    pub room: String,

    /// Optional photo reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<PhotoRef>,

    /// Optional free-text notes, may span several lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// When the entry was created.
    pub timestamp: DateTime<Utc>,

    /// Optional checklist payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checklist: Option<Checklist>,
}

impl InspectionEntry {
    /// Whether the entry carries notes with visible text.
    #[must_use]
    pub fn has_notes(&self) -> bool {
        self.notes
            .as_deref()
            .is_some_and(|notes| !notes.trim().is_empty())
    }
}

/// Draft of an entry, as supplied by a caller to `append`.
///
/// `id` and `timestamp` are normally left unset and filled in by the store.
/// Setting them is meant for importing records that already carry identity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewEntry {
    /// Pre-assigned identifier, if any.
    pub id: Option<EntryId>,
    /// Free-text room label.
    pub room: String,
    /// Optional photo reference.
    pub photo: Option<PhotoRef>,
    /// Optional notes.
    pub notes: Option<String>,
    /// Pre-assigned creation instant, if any.
    pub timestamp: Option<DateTime<Utc>>,
    /// Optional checklist payload.
    pub checklist: Option<Checklist>,
}

impl NewEntry {
    /// Start a draft for the given room.
    #[must_use]
    pub fn new(room: impl Into<String>) -> Self {
        Self {
            room: room.into(),
            ..Self::default()
        }
    }

    /// Attach notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Attach a photo reference.
    #[must_use]
    pub fn with_photo(mut self, photo: PhotoRef) -> Self {
        self.photo = Some(photo);
        self
    }

    /// Attach a checklist.
    #[must_use]
    pub fn with_checklist(mut self, checklist: Checklist) -> Self {
        self.checklist = Some(checklist);
        self
    }

    /// Pre-assign the identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<EntryId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Pre-assign the creation instant.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Turn the draft into an entry, filling a missing id or timestamp.
    ///
    /// `now` is only consulted when the draft has no timestamp.
    #[must_use]
    pub fn into_entry(self, now: impl FnOnce() -> DateTime<Utc>) -> InspectionEntry {
        InspectionEntry {
            id: self.id.unwrap_or_else(EntryId::generate),
            room: self.room,
            photo: self.photo,
            notes: self.notes,
            timestamp: self.timestamp.unwrap_or_else(now),
            checklist: self.checklist,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_entry_id_generate_is_unique() {
        let a = EntryId::generate();
        let b = EntryId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 36);
    }

    #[test]
    fn test_entry_id_display() {
        let id = EntryId::from("1700000000000");
        assert_eq!(id.to_string(), "1700000000000");
    }

    #[test]
    fn test_into_entry_assigns_missing_fields() {
        let fixed = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let entry = NewEntry::new("Kitchen")
            .with_notes("Tap drips")
            .into_entry(|| fixed);

        assert_eq!(entry.room, "Kitchen");
        assert_eq!(entry.notes.as_deref(), Some("Tap drips"));
        assert_eq!(entry.timestamp, fixed);
        assert!(!entry.id.as_str().is_empty());
    }

    #[test]
    fn test_into_entry_keeps_preassigned_fields() {
        let given = Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap();
        let entry = NewEntry::new("Hall")
            .with_id("imported-7")
            .with_timestamp(given)
            .into_entry(|| panic!("clock must not be read"));

        assert_eq!(entry.id, EntryId::from("imported-7"));
        assert_eq!(entry.timestamp, given);
    }

    #[test]
    fn test_has_notes() {
        let now = Utc::now();
        let blank = NewEntry::new("Hall").with_notes("  \n ").into_entry(|| now);
        assert!(!blank.has_notes());

        let none = NewEntry::new("Hall").into_entry(|| now);
        assert!(!none.has_notes());

        let some = NewEntry::new("Hall").with_notes("crack").into_entry(|| now);
        assert!(some.has_notes());
    }

    #[test]
    fn test_checklist_from_strings() {
        let checklist: Checklist = ["outlets", "smoke alarm"].into_iter().collect();
        assert_eq!(checklist.len(), 2);
        assert_eq!(checklist.items()[1], serde_json::json!("smoke alarm"));
        assert!(!checklist.is_empty());
    }

    #[test]
    fn test_entry_serialization() {
        let entry = NewEntry::new("Balcony")
            .with_photo(PhotoRef::new("data:image/png;base64,AAAA"))
            .with_checklist(Checklist::new(vec![serde_json::json!({"item": "rail", "ok": true})]))
            .into_entry(Utc::now);

        let json = serde_json::to_string(&entry).unwrap();
        let deserialized: InspectionEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, deserialized);
        assert!(!json.contains("notes"));
    }

    #[test]
    fn test_suggested_rooms() {
        assert!(SUGGESTED_ROOMS.contains(&"Kitchen"));
        assert_eq!(SUGGESTED_ROOMS.len(), 6);
    }
}
