//! Paginated report documents.
//!
//! [`compile`] lays a sequence of inspection entries out on fixed-height
//! pages. The resulting [`Document`] is plain data: pages of blocks, each
//! block one line of text at a vertical offset. Rendering it to a binary
//! format (and resolving photo references to image bytes) is left to the
//! consumer; [`render_text`] is a plain-text stand-in.
//!
//! # Example
//!
//! ```
//! use homeinspect::document::{compile, LayoutConfig};
//! use homeinspect::{MemoryStore, NewEntry, RecordStore};
//!
//! let store = MemoryStore::new();
//! store.append(NewEntry::new("Kitchen").with_notes("Tap drips"))?;
//!
//! let document = compile(&store.list_all()?, &LayoutConfig::default())?;
//! assert_eq!(document.page_count(), 1);
//! # Ok::<(), homeinspect::Error>(())
//! ```

mod compiler;
mod layout;
mod text;
mod wrap;

pub use compiler::{compile, compile_with, format_timestamp};
pub use layout::{LayoutConfig, DEFAULT_TITLE};
pub use text::render_text;
pub use wrap::{wrap_text, CharCount, TextMeasure};

use serde::{Deserialize, Serialize};

use crate::entry::PhotoRef;
use crate::error::Result;

/// A compiled report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Pages in order. Never empty.
    pub pages: Vec<Page>,
}

/// One page of a [`Document`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// 1-based page number.
    pub number: usize,
    /// Maximum vertical extent of the page's content.
    pub content_height: u32,
    /// Blocks in placement order, with increasing `y`.
    pub blocks: Vec<Block>,
}

/// One placed line of content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    /// Report title.
    Title {
        /// Vertical offset.
        y: u32,
        /// Title text.
        text: String,
    },
    /// Heading line of an entry.
    Heading {
        /// Vertical offset.
        y: u32,
        /// 1-based position of the entry in the compiled sequence.
        entry: usize,
        /// Heading text.
        text: String,
        /// The entry's photo, for the renderer to resolve.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        photo: Option<PhotoRef>,
    },
    /// One wrapped line of an entry's notes.
    Line {
        /// Vertical offset.
        y: u32,
        /// 1-based position of the entry in the compiled sequence.
        entry: usize,
        /// Line text.
        text: String,
    },
}

impl Block {
    /// Vertical offset of the block on its page.
    #[must_use]
    pub fn y(&self) -> u32 {
        match self {
            Self::Title { y, .. } | Self::Heading { y, .. } | Self::Line { y, .. } => *y,
        }
    }

    /// Text of the block.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Title { text, .. } | Self::Heading { text, .. } | Self::Line { text, .. } => {
                text
            }
        }
    }

    /// Entry the block belongs to, if any.
    #[must_use]
    pub fn entry(&self) -> Option<usize> {
        match self {
            Self::Title { .. } => None,
            Self::Heading { entry, .. } | Self::Line { entry, .. } => Some(*entry),
        }
    }

    /// Whether this is an entry heading.
    #[must_use]
    pub fn is_heading(&self) -> bool {
        matches!(self, Self::Heading { .. })
    }
}

impl Document {
    /// Number of pages.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Number of entries laid out.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.blocks().filter(|block| block.is_heading()).count()
    }

    /// Every block, page by page.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.pages.iter().flat_map(|page| page.blocks.iter())
    }

    /// Hex BLAKE3 digest of the document's JSON form.
    ///
    /// Two documents have the same fingerprint exactly when they are
    /// structurally identical.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be serialized.
    pub fn fingerprint(&self) -> Result<String> {
        let bytes = serde_json::to_vec(self)?;
        Ok(blake3::hash(&bytes).to_hex().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        Document {
            pages: vec![Page {
                number: 1,
                content_height: 100,
                blocks: vec![
                    Block::Title {
                        y: 0,
                        text: DEFAULT_TITLE.to_string(),
                    },
                    Block::Heading {
                        y: 10,
                        entry: 1,
                        text: "1. [Hall] 2024-01-01 00:00:00 UTC".to_string(),
                        photo: Some(PhotoRef::new("hall.jpg")),
                    },
                    Block::Line {
                        y: 20,
                        entry: 1,
                        text: "scuffed skirting".to_string(),
                    },
                ],
            }],
        }
    }

    #[test]
    fn test_block_accessors() {
        let document = sample();
        let blocks: Vec<_> = document.blocks().collect();

        assert_eq!(blocks[0].entry(), None);
        assert_eq!(blocks[1].entry(), Some(1));
        assert_eq!(blocks[2].y(), 20);
        assert_eq!(blocks[2].text(), "scuffed skirting");
        assert!(blocks[1].is_heading());
        assert_eq!(document.entry_count(), 1);
        assert_eq!(document.page_count(), 1);
    }

    #[test]
    fn test_block_json_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        let heading = &json["pages"][0]["blocks"][1];
        assert_eq!(heading["kind"], "heading");
        assert_eq!(heading["photo"], "hall.jpg");
        assert!(json["pages"][0]["blocks"][2].get("photo").is_none());
    }

    #[test]
    fn test_fingerprint_tracks_content() {
        let a = sample();
        let mut b = sample();
        assert_eq!(a.fingerprint().unwrap(), b.fingerprint().unwrap());

        b.pages[0].blocks.pop();
        assert_ne!(a.fingerprint().unwrap(), b.fingerprint().unwrap());
        assert_eq!(a.fingerprint().unwrap().len(), 64);
    }
}
