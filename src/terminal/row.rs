//! Row cells: a colored band with a centred label.

use super::color::Rgb;
use crate::pool::{Reusable, ReuseTag};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Reuse tag for [`ColorRow`] cells.
pub const ROW_REUSE_TAG: ReuseTag = ReuseTag("color-row");

/// What a list item must expose to be drawn as a row.
pub trait RowContent {
    /// Background color of the row.
    fn color(&self) -> Rgb;
    /// Label shown centred in the row.
    fn title(&self) -> &str;
}

/// A visual cell showing one item as a colored band.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColorRow {
    /// Band color; `None` on a recycled cell.
    pub color: Option<Rgb>,
    /// Label; empty on a recycled cell.
    pub title: String,
}

impl ColorRow {
    /// Copy content from `item` into the cell.
    pub fn configure<T: RowContent>(&mut self, item: &T) {
        self.color = Some(item.color());
        self.title.clear();
        self.title.push_str(item.title());
    }

    /// Whether the cell holds no content.
    pub fn is_blank(&self) -> bool {
        self.color.is_none() && self.title.is_empty()
    }
}

impl Reusable for ColorRow {
    fn prepare_for_reuse(&mut self) {
        self.color = None;
        self.title.clear();
    }
}

/// Cut `text` so its display width is at most `max_width` columns.
///
/// Never splits a grapheme cluster.
pub fn truncate_to_width(text: &str, max_width: usize) -> &str {
    if text.width() <= max_width {
        return text;
    }
    let mut used = 0;
    let mut end = 0;
    for (offset, grapheme) in text.grapheme_indices(true) {
        let width = grapheme.width();
        if used + width > max_width {
            break;
        }
        used += width;
        end = offset + grapheme.len();
    }
    &text[..end]
}

/// Column where `text` starts when centred in `width` columns, and the
/// (possibly truncated) text itself.
pub fn centred(text: &str, width: u16) -> (u16, &str) {
    let shown = truncate_to_width(text, usize::from(width));
    // `shown` fits in `width`, so its width fits in u16.
    let shown_width = u16::try_from(shown.width()).unwrap_or(width);
    ((width - shown_width) / 2, shown)
}
