//! Page geometry used by the compiler.

use serde::{Deserialize, Serialize};

use super::wrap::TextMeasure;
use crate::error::{Error, Result};

/// Default report title.
pub const DEFAULT_TITLE: &str = "Home Inspectors Report";

/// Layout constants for [`compile`](super::compile).
///
/// All values are in the same abstract unit (the renderer decides whether
/// that is millimetres or points), except `wrap_width`, which is measured by
/// the [`TextMeasure`] in use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Maximum vertical extent of content on a page.
    pub page_content_height: u32,
    /// Height of one placed line.
    pub line_height: u32,
    /// Vertical offset of the first block on every page.
    pub margin_top: u32,
    /// Maximum measured width of one wrapped line.
    pub wrap_width: u32,
    /// Gap inserted after each entry.
    pub entry_spacing: u32,
    /// Title placed at the top of the first page, if any.
    pub title: Option<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_content_height: 260,
            line_height: 6,
            margin_top: 20,
            wrap_width: 90,
            entry_spacing: 6,
            title: Some(DEFAULT_TITLE.to_string()),
        }
    }
}

impl LayoutConfig {
    /// Check the constants against the given measure.
    ///
    /// `margin_top` and `entry_spacing` may be zero; everything else must be
    /// positive, and one line must fit below the top margin.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLayout`] naming the first violated constraint.
    pub fn validate_with(&self, measure: &dyn TextMeasure) -> Result<()> {
        for (name, value) in [
            ("page_content_height", self.page_content_height),
            ("line_height", self.line_height),
            ("wrap_width", self.wrap_width),
        ] {
            if value == 0 {
                return Err(Error::invalid_layout(format!(
                    "{name} must be greater than 0"
                )));
            }
        }

        if measure.min_char_width() > self.wrap_width {
            return Err(Error::invalid_layout(format!(
                "wrap_width ({}) cannot fit a single character",
                self.wrap_width
            )));
        }

        let first_line_bottom = u64::from(self.margin_top) + u64::from(self.line_height);
        if first_line_bottom > u64::from(self.page_content_height) {
            return Err(Error::invalid_layout(format!(
                "margin_top ({}) plus line_height ({}) exceeds page_content_height ({})",
                self.margin_top, self.line_height, self.page_content_height
            )));
        }

        Ok(())
    }

    /// Check the constants for character-count wrapping.
    ///
    /// # Errors
    ///
    /// See [`validate_with`](Self::validate_with).
    pub fn validate(&self) -> Result<()> {
        self.validate_with(&super::wrap::CharCount)
    }
}
