//! Greedy single-pass pagination.

use chrono::{DateTime, Utc};
use tracing::info;

use super::layout::LayoutConfig;
use super::wrap::{wrap_text, CharCount, TextMeasure};
use super::{Block, Document, Page};
use crate::entry::InspectionEntry;
use crate::error::Result;

/// Lay out `entries` with character-count wrapping.
///
/// See [`compile_with`].
///
/// # Errors
///
/// Returns [`Error::InvalidLayout`](crate::Error::InvalidLayout) if the
/// layout is unusable. No document is produced in that case.
pub fn compile(entries: &[InspectionEntry], layout: &LayoutConfig) -> Result<Document> {
    compile_with(entries, layout, &CharCount)
}

/// Lay out `entries` on pages, in order, measuring text with `measure`.
///
/// Each entry becomes a heading line (`"<n>. [<room>] <timestamp>"`)
/// followed by its wrapped notes and `entry_spacing` of blank space. A block
/// that would end below `page_content_height` moves to a fresh page
/// instead; blocks are never split. The result depends only on the inputs.
///
/// # Errors
///
/// Returns [`Error::InvalidLayout`](crate::Error::InvalidLayout) before any
/// layout work if the layout is unusable for `measure`.
pub fn compile_with(
    entries: &[InspectionEntry],
    layout: &LayoutConfig,
    measure: &dyn TextMeasure,
) -> Result<Document> {
    layout.validate_with(measure)?;

    let mut pager = Pager::new(layout);

    if let Some(title) = layout.title.as_deref().filter(|t| !t.trim().is_empty()) {
        pager.place(|y| Block::Title {
            y,
            text: title.to_string(),
        });
        pager.advance(layout.entry_spacing);
    }

    for (position, entry) in entries.iter().enumerate() {
        let index = position + 1;

        pager.place(|y| Block::Heading {
            y,
            entry: index,
            text: heading(index, entry),
            photo: entry.photo.clone(),
        });

        if let Some(notes) = entry.notes.as_deref() {
            for text in wrap_text(notes, layout.wrap_width, measure) {
                pager.place(|y| Block::Line {
                    y,
                    entry: index,
                    text,
                });
            }
        }

        pager.advance(layout.entry_spacing);
    }

    let document = pager.finish();
    info!(
        "Compiled {} entries onto {} pages",
        entries.len(),
        document.page_count()
    );
    Ok(document)
}

/// Render a timestamp as `YYYY-MM-DD HH:MM:SS UTC`.
///
/// The format is fixed and independent of locale or local time zone.
#[must_use]
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn heading(index: usize, entry: &InspectionEntry) -> String {
    let room = entry.room.lines().collect::<Vec<_>>().join(" ");
    format!(
        "{index}. [{room}] {}",
        format_timestamp(&entry.timestamp)
    )
}

/// Cursor over the page being filled.
struct Pager<'a> {
    layout: &'a LayoutConfig,
    pages: Vec<Page>,
    current: Page,
    y: u32,
}

impl<'a> Pager<'a> {
    fn new(layout: &'a LayoutConfig) -> Self {
        Self {
            layout,
            pages: Vec::new(),
            current: Self::blank_page(layout, 1),
            y: layout.margin_top,
        }
    }

    fn blank_page(layout: &LayoutConfig, number: usize) -> Page {
        Page {
            number,
            content_height: layout.page_content_height,
            blocks: Vec::new(),
        }
    }

    /// Place one line-high block, breaking the page first if it would
    /// overflow.
    fn place(&mut self, block_at: impl FnOnce(u32) -> Block) {
        let bottom = u64::from(self.y) + u64::from(self.layout.line_height);
        if bottom > u64::from(self.layout.page_content_height) {
            self.break_page();
        }

        self.current.blocks.push(block_at(self.y));
        self.advance(self.layout.line_height);
    }

    fn advance(&mut self, by: u32) {
        self.y = self.y.saturating_add(by);
    }

    fn break_page(&mut self) {
        let next = Self::blank_page(self.layout, self.current.number + 1);
        self.pages.push(std::mem::replace(&mut self.current, next));
        self.y = self.layout.margin_top;
    }

    fn finish(mut self) -> Document {
        self.pages.push(self.current);
        Document { pages: self.pages }
    }
}
