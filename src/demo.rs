//! The color list shown by the `color_list` example.
//!
//! Three colored rows; after a short delay the third row is renamed, which
//! reconciles to a single in-place update.

use crate::actor::KeyCode;
use crate::snapshot::Identifiable;
use crate::terminal::{Rgb, RowContent};
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// How long the demo waits before renaming.
pub const RENAME_DELAY: Duration = Duration::from_secs(3);

/// Index of the row that gets renamed.
pub const RENAMED_INDEX: usize = 2;

/// The new name.
pub const RENAMED_TO: &str = "Billy Bob";

/// Stable item identity, assigned once at construction.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(Uuid);

impl ItemId {
    /// A fresh random identity.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The first block is plenty to tell rows apart in logs.
        let text = self.0.simple().to_string();
        write!(f, "ItemId({})", &text[..8])
    }
}

/// The list's only section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// The one and only section.
    Only,
}

/// A named, colored row.
///
/// Identity is the `id` alone; `color` and `name` are content, so changing
/// them updates the row in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorItem {
    id: ItemId,
    /// Row color.
    pub color: Rgb,
    /// Row label.
    pub name: String,
}

impl ColorItem {
    /// A new item with a fresh identity.
    pub fn new(color: Rgb, name: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(),
            color,
            name: name.into(),
        }
    }
}

impl Identifiable for ColorItem {
    type Id = ItemId;

    fn id(&self) -> ItemId {
        self.id
    }
}

impl RowContent for ColorItem {
    fn color(&self) -> Rgb {
        self.color
    }

    fn title(&self) -> &str {
        &self.name
    }
}

/// Roger (red), Bill (blue), Jeff (green).
pub fn starting_items() -> Vec<ColorItem> {
    vec![
        ColorItem::new(Rgb::RED, "Roger"),
        ColorItem::new(Rgb::BLUE, "Bill"),
        ColorItem::new(Rgb::GREEN, "Jeff"),
    ]
}

/// Apply the demo's delayed rename to `items`.
pub fn rename(items: &mut [ColorItem]) {
    if let Some(item) = items.get_mut(RENAMED_INDEX) {
        item.name = RENAMED_TO.to_string();
    }
}

/// Scroll distance for a navigation key, in lines.
///
/// Page keys move by `page_height`, which callers read at key time so a
/// resize takes effect on the next press. Non-navigation keys give `None`.
pub fn scroll_delta(code: KeyCode, page_height: u16) -> Option<isize> {
    let page = page_height.max(1) as isize;
    match code {
        KeyCode::Up => Some(-1),
        KeyCode::Down => Some(1),
        KeyCode::PageUp => Some(-page),
        KeyCode::PageDown => Some(page),
        KeyCode::Home => Some(isize::MIN),
        KeyCode::End => Some(isize::MAX),
        _ => None,
    }
}
