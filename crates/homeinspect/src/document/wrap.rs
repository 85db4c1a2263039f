//! Word wrapping for entry notes.

/// Measures the rendered width of text.
///
/// Widths are assumed additive: the width of `"a b"` is the width of `"a"`
/// plus the width of `" "` plus the width of `"b"`.
pub trait TextMeasure {
    /// Width of `text` in layout units.
    fn width(&self, text: &str) -> u32;

    /// Width of the narrowest single character.
    fn min_char_width(&self) -> u32 {
        1
    }
}

/// Monospace measure: one unit per character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharCount;

impl TextMeasure for CharCount {
    fn width(&self, text: &str) -> u32 {
        u32::try_from(text.chars().count()).unwrap_or(u32::MAX)
    }
}

/// Wrap `text` into lines no wider than `wrap_width`.
///
/// Line breaks in the source (`\n`, `\r\n` or a lone `\r`) are kept as hard
/// breaks, and blank source lines become empty output lines. Trailing line
/// breaks are dropped. Within a source line, words are packed greedily with
/// single spaces. A word that is wider than `wrap_width` on its own is never
/// split; it gets a line to itself. Text with no visible characters yields
/// no lines.
#[must_use]
pub fn wrap_text(text: &str, wrap_width: u32, measure: &dyn TextMeasure) -> Vec<String> {
    let text = text.trim_end_matches(&['\r', '\n'][..]);
    if text.trim().is_empty() {
        return Vec::new();
    }

    let text = text.replace("\r\n", "\n");
    let space = measure.width(" ");
    let mut lines = Vec::new();
    for source_line in text.split(|c: char| c == '\n' || c == '\r') {
        let mut current = String::new();
        let mut current_width: u64 = 0;

        for word in source_line.split_whitespace() {
            let word_width = u64::from(measure.width(word));
            if current.is_empty() {
                current.push_str(word);
                current_width = word_width;
            } else if current_width + u64::from(space) + word_width <= u64::from(wrap_width) {
                current.push(' ');
                current.push_str(word);
                current_width += u64::from(space) + word_width;
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_width;
            }
        }

        lines.push(current);
    }

    lines
}
