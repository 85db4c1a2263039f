//! Plain-text rendering of a compiled document.

use std::fmt::Write as _;

use super::{Block, Document};

/// Render `document` as plain text.
///
/// Pages are separated by a form feed. Note lines are indented under their
/// heading and a photo reference is shown after its heading.
#[must_use]
pub fn render_text(document: &Document) -> String {
    let total = document.page_count();
    let mut out = String::new();

    for page in &document.pages {
        if page.number > 1 {
            out.push('\u{c}');
            out.push('\n');
        }
        let _ = writeln!(out, "-- page {} of {total} --", page.number);

        for block in &page.blocks {
            match block {
                Block::Title { text, .. } => {
                    let _ = writeln!(out, "{text}");
                    let _ = writeln!(out, "{}", "=".repeat(text.chars().count()));
                }
                Block::Heading { text, photo, .. } => {
                    let _ = writeln!(out, "{text}");
                    if let Some(photo) = photo {
                        let _ = writeln!(out, "  [photo: {}]", photo.as_str());
                    }
                }
                Block::Line { text, .. } => {
                    let _ = writeln!(out, "  {text}");
                }
            }
        }
    }

    out
}
