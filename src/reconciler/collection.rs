//! `CellCollection`: the live, ordered visual collection.
//!
//! Slots bind one item identity to one cell while the item is shown. Edits
//! from a [`Changeset`] are applied here in order; the presenter is asked
//! to render, update or recycle cells along the way.

use super::presenter::Presenter;
use crate::diff::{Changeset, Edit};
use crate::snapshot::{Identifiable, IndexPath, SectionIdentifier, Snapshot};
use tracing::trace;

/// An item identity bound to its visual cell.
#[derive(Debug)]
pub struct Slot<K, C> {
    /// Item identity.
    pub id: K,
    /// The cell currently showing the item.
    pub cell: C,
}

/// One section of the visual collection.
#[derive(Debug)]
pub struct SectionSlots<S, K, C> {
    /// Section identity.
    pub id: S,
    /// Slots in display order.
    pub slots: Vec<Slot<K, C>>,
}

/// Sections of (identity, cell) slots in display order.
#[derive(Debug)]
pub struct CellCollection<S, K, C> {
    sections: Vec<SectionSlots<S, K, C>>,
}

impl<S, K, C> CellCollection<S, K, C> {
    /// An empty collection.
    pub const fn new() -> Self {
        Self {
            sections: Vec::new(),
        }
    }

    /// Sections in display order.
    pub fn sections(&self) -> &[SectionSlots<S, K, C>] {
        &self.sections
    }

    /// Number of sections.
    pub fn number_of_sections(&self) -> usize {
        self.sections.len()
    }

    /// Number of cells across all sections.
    pub fn len(&self) -> usize {
        self.sections.iter().map(|section| section.slots.len()).sum()
    }

    /// Whether no cells are shown.
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(|section| section.slots.is_empty())
    }

    /// The slot at a position.
    pub fn get(&self, at: IndexPath) -> Option<&Slot<K, C>> {
        self.sections.get(at.section)?.slots.get(at.item)
    }

    /// Every slot in display order, with its position.
    pub fn iter(&self) -> impl Iterator<Item = (IndexPath, &Slot<K, C>)> {
        self.sections.iter().enumerate().flat_map(|(section, entry)| {
            entry
                .slots
                .iter()
                .enumerate()
                .map(move |(item, slot)| (IndexPath::new(section, item), slot))
        })
    }

    /// Apply `changeset` in order, calling into `presenter` for cell work.
    ///
    /// `snapshot` is the snapshot the changeset leads to; inserted and
    /// updated items take their content from it.
    pub(crate) fn apply<T, P>(
        &mut self,
        changeset: &Changeset<S, K>,
        snapshot: &Snapshot<S, T>,
        presenter: &mut P,
    ) where
        S: SectionIdentifier,
        K: std::fmt::Debug,
        T: Identifiable<Id = K>,
        P: Presenter<S, T, Cell = C>,
    {
        for edit in changeset {
            trace!(?edit, "applying edit");
            match edit {
                Edit::RemoveItem { at, .. } => {
                    let slot = self.sections[at.section].slots.remove(at.item);
                    presenter.remove_cell(slot.cell);
                }
                Edit::RemoveSection { index, .. } => {
                    let section = self.sections.remove(*index);
                    debug_assert!(section.slots.is_empty(), "sections are emptied before removal");
                    for slot in section.slots {
                        presenter.remove_cell(slot.cell);
                    }
                }
                Edit::InsertSection { id, index } => {
                    self.sections.insert(
                        *index,
                        SectionSlots {
                            id: id.clone(),
                            slots: Vec::new(),
                        },
                    );
                }
                Edit::InsertItem { id, at } => {
                    let Some(item) = snapshot.item(id) else {
                        debug_assert!(false, "inserted item {id:?} missing from snapshot");
                        continue;
                    };
                    let cell = presenter.render(item);
                    self.sections[at.section].slots.insert(
                        at.item,
                        Slot {
                            id: item.id(),
                            cell,
                        },
                    );
                }
                Edit::MoveSection { from, to, .. } => {
                    let section = self.sections.remove(*from);
                    self.sections.insert(*to, section);
                }
                Edit::MoveItem {
                    section, from, to, ..
                } => {
                    let slots = &mut self.sections[*section].slots;
                    let slot = slots.remove(*from);
                    slots.insert(*to, slot);
                }
                Edit::UpdateItem { id, at } => {
                    let Some(item) = snapshot.item(id) else {
                        debug_assert!(false, "updated item {id:?} missing from snapshot");
                        continue;
                    };
                    let slot = &mut self.sections[at.section].slots[at.item];
                    presenter.update_content(&mut slot.cell, item);
                }
            }
        }
    }
}

impl<S, K, C> Default for CellCollection<S, K, C> {
    fn default() -> Self {
        Self::new()
    }
}
