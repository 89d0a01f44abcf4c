//! Changeset: the ordered edit list between two snapshots.
//!
//! Diffing works on identities only. Hash maps are used for lookups and are
//! never iterated to produce output, so the same `(old, new)` pair always
//! yields the same edits in the same order.
//!
//! # Cross-section changes
//!
//! An item whose section identity differs between `old` and `new` is
//! removed from its old section and inserted into its new one, so it gets a
//! freshly rendered cell. Sections are therefore always removed empty and
//! inserted empty; their items are edited individually.

use super::edit::{Edit, EditKinds};
use super::reorder::{plan_reorder, ReorderPlan};
use crate::snapshot::{Identifiable, IndexPath, SectionIdentifier, Snapshot};

/// Ordered, sequentially-indexed edits for one transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Changeset<S, K> {
    edits: Vec<Edit<S, K>>,
}

impl<S, K> Changeset<S, K> {
    /// A changeset with no edits.
    pub const fn empty() -> Self {
        Self { edits: Vec::new() }
    }

    /// The edits, in application order.
    pub fn edits(&self) -> &[Edit<S, K>] {
        &self.edits
    }

    /// Iterate the edits in application order.
    pub fn iter(&self) -> std::slice::Iter<'_, Edit<S, K>> {
        self.edits.iter()
    }

    /// Number of edits.
    pub fn len(&self) -> usize {
        self.edits.len()
    }

    /// Whether there is nothing to do.
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Union of the kinds of every edit.
    pub fn kinds(&self) -> EditKinds {
        self.edits
            .iter()
            .fold(EditKinds::empty(), |kinds, edit| kinds | edit.kind())
    }

    /// Number of edits whose kind contains all of `kinds`.
    pub fn count(&self, kinds: EditKinds) -> usize {
        self.edits
            .iter()
            .filter(|edit| edit.kind().contains(kinds))
            .count()
    }
}

impl<S: SectionIdentifier, K: Clone + Eq + std::hash::Hash> Changeset<S, K> {
    /// Full build: every section, then every item, inserted in order.
    ///
    /// Used for the very first apply; nothing is diffed.
    pub fn initial<T>(snapshot: &Snapshot<S, T>) -> Self
    where
        T: Identifiable<Id = K>,
    {
        let mut edits = Vec::with_capacity(snapshot.number_of_sections() + snapshot.number_of_items());

        for (index, id) in snapshot.section_ids().enumerate() {
            edits.push(Edit::InsertSection {
                id: id.clone(),
                index,
            });
        }

        for (section, entry) in snapshot.sections().iter().enumerate() {
            for (item, id) in entry.items().iter().enumerate() {
                edits.push(Edit::InsertItem {
                    id: id.clone(),
                    at: IndexPath::new(section, item),
                });
            }
        }

        Self { edits }
    }

    /// Diff `old` against `new`.
    pub fn between<T>(old: &Snapshot<S, T>, new: &Snapshot<S, T>) -> Self
    where
        T: Identifiable<Id = K> + PartialEq,
    {
        let mut edits = Vec::new();

        // An item survives only if `new` keeps it in the same section.
        let survives = |id: &K, section: &S| new.section_of(id) == Some(section);

        // 1. Item removals, old order.
        for (section_idx, entry) in old.sections().iter().enumerate() {
            let mut removed = 0;
            for (item_idx, id) in entry.items().iter().enumerate() {
                if !survives(id, entry.id()) {
                    edits.push(Edit::RemoveItem {
                        id: id.clone(),
                        at: IndexPath::new(section_idx, item_idx - removed),
                    });
                    removed += 1;
                }
            }
        }

        // 2. Section removals, old order.
        let mut removed = 0;
        for (index, id) in old.section_ids().enumerate() {
            if !new.contains_section(id) {
                edits.push(Edit::RemoveSection {
                    id: id.clone(),
                    index: index - removed,
                });
                removed += 1;
            }
        }

        // 3. Section insertions.
        let surviving_sections: Vec<S> = old
            .section_ids()
            .filter(|id| new.contains_section(id))
            .cloned()
            .collect();
        let target_sections: Vec<S> = new.section_ids().cloned().collect();
        let section_plan = plan_reorder(&surviving_sections, &target_sections);

        for (id, index) in &section_plan.inserts {
            edits.push(Edit::InsertSection {
                id: id.clone(),
                index: *index,
            });
        }

        // 4. Item insertions, addressed by the staged (pre-move) section order.
        let mut item_plans: Vec<ReorderPlan<K>> = Vec::with_capacity(target_sections.len());
        for entry in new.sections() {
            let surviving_items: Vec<K> = old
                .item_ids(entry.id())
                .unwrap_or_default()
                .iter()
                .filter(|&id| survives(id, entry.id()))
                .cloned()
                .collect();
            let plan = plan_reorder(&surviving_items, entry.items());

            let staged_section = section_plan
                .staged
                .iter()
                .position(|id| id == entry.id())
                .unwrap_or_default();
            for (id, index) in &plan.inserts {
                edits.push(Edit::InsertItem {
                    id: id.clone(),
                    at: IndexPath::new(staged_section, *index),
                });
            }

            item_plans.push(plan);
        }

        // 5. Section moves.
        for (id, from, to) in &section_plan.moves {
            edits.push(Edit::MoveSection {
                id: id.clone(),
                from: *from,
                to: *to,
            });
        }

        // 6. Item moves, sections now in final order.
        for (section, plan) in item_plans.iter().enumerate() {
            for (id, from, to) in &plan.moves {
                edits.push(Edit::MoveItem {
                    id: id.clone(),
                    section,
                    from: *from,
                    to: *to,
                });
            }
        }

        // 7. Content updates at final positions.
        for (section, entry) in new.sections().iter().enumerate() {
            for (item, id) in entry.items().iter().enumerate() {
                if old.section_of(id) != Some(entry.id()) {
                    continue;
                }
                if old.item(id) != new.item(id) {
                    edits.push(Edit::UpdateItem {
                        id: id.clone(),
                        at: IndexPath::new(section, item),
                    });
                }
            }
        }

        Self { edits }
    }
}

impl<S, K> Default for Changeset<S, K> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a, S, K> IntoIterator for &'a Changeset<S, K> {
    type Item = &'a Edit<S, K>;
    type IntoIter = std::slice::Iter<'a, Edit<S, K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.edits.iter()
    }
}
