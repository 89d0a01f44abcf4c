//! Snapshot: an immutable declaration of what the list should show.
//!
//! A snapshot is a value object. Callers build a fresh one every time their
//! data changes and hand it to the reconciler, which keeps only the most
//! recently applied snapshot as its baseline.

use super::identity::{Identifiable, IndexPath, SectionIdentifier};
use crate::error::SnapshotError;
use std::collections::HashMap;

/// One section of a snapshot: its identity and its ordered item identities.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionEntry<S, K> {
    id: S,
    items: Vec<K>,
}

impl<S, K> SectionEntry<S, K> {
    /// The section identity.
    pub const fn id(&self) -> &S {
        &self.id
    }

    /// Item identities in display order.
    pub fn items(&self) -> &[K] {
        &self.items
    }
}

/// Ordered sections of item identities plus a map from identity to content.
///
/// # Invariants
///
/// - Item identities are unique across the whole snapshot.
/// - Section identities are unique.
/// - Every identity referenced by a section has a content entry.
///
/// All three hold by construction: the only way to obtain a non-empty
/// snapshot is through [`SnapshotBuilder::build`] or [`Snapshot::build`],
/// both of which validate.
#[derive(Clone)]
pub struct Snapshot<S, T: Identifiable> {
    sections: Vec<SectionEntry<S, T::Id>>,
    items: HashMap<T::Id, T>,
    locations: HashMap<T::Id, IndexPath>,
    section_index: HashMap<S, usize>,
}

impl<S, T: Identifiable> Snapshot<S, T> {
    /// A snapshot with no sections.
    pub fn empty() -> Self {
        Self {
            sections: Vec::new(),
            items: HashMap::new(),
            locations: HashMap::new(),
            section_index: HashMap::new(),
        }
    }

    /// Sections in display order.
    pub fn sections(&self) -> &[SectionEntry<S, T::Id>] {
        &self.sections
    }

    /// Section identities in display order.
    pub fn section_ids(&self) -> impl Iterator<Item = &S> {
        self.sections.iter().map(|section| &section.id)
    }

    /// Number of sections.
    pub fn number_of_sections(&self) -> usize {
        self.sections.len()
    }

    /// Number of items across all sections.
    pub fn number_of_items(&self) -> usize {
        self.items.len()
    }

    /// Whether the snapshot has no sections at all.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl<S: SectionIdentifier, T: Identifiable> Snapshot<S, T> {
    /// Build a snapshot from ordered `(section, items)` pairs.
    ///
    /// Fails if an item identity or a section identity is duplicated.
    pub fn build<I, J>(sections: I) -> Result<Self, SnapshotError>
    where
        I: IntoIterator<Item = (S, J)>,
        J: IntoIterator<Item = T>,
    {
        sections
            .into_iter()
            .fold(SnapshotBuilder::new(), |builder, (section, items)| {
                builder.append_section(section).append_items(items)
            })
            .build()
    }

    /// Item identities of a section, or `None` if the section is absent.
    pub fn item_ids(&self, section: &S) -> Option<&[T::Id]> {
        self.section_index
            .get(section)
            .map(|&index| self.sections[index].items())
    }

    /// Index of a section, or `None` if absent.
    pub fn section_index(&self, section: &S) -> Option<usize> {
        self.section_index.get(section).copied()
    }

    /// Whether the section is part of this snapshot.
    pub fn contains_section(&self, section: &S) -> bool {
        self.section_index.contains_key(section)
    }

    /// Content of an item.
    pub fn item(&self, id: &T::Id) -> Option<&T> {
        self.items.get(id)
    }

    /// Whether an item with this identity is part of this snapshot.
    pub fn contains_item(&self, id: &T::Id) -> bool {
        self.items.contains_key(id)
    }

    /// Position of an item.
    pub fn index_path(&self, id: &T::Id) -> Option<IndexPath> {
        self.locations.get(id).copied()
    }

    /// Identity of the section holding an item.
    pub fn section_of(&self, id: &T::Id) -> Option<&S> {
        self.locations
            .get(id)
            .map(|path| &self.sections[path.section].id)
    }

    /// Items in display order, with their positions.
    pub fn iter(&self) -> impl Iterator<Item = (IndexPath, &T)> {
        self.sections
            .iter()
            .enumerate()
            .flat_map(move |(section, entry)| {
                entry.items.iter().enumerate().filter_map(move |(item, id)| {
                    self.items
                        .get(id)
                        .map(|content| (IndexPath::new(section, item), content))
                })
            })
    }
}

impl<S, T: Identifiable> Default for Snapshot<S, T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<S: std::fmt::Debug, T: Identifiable> std::fmt::Debug for Snapshot<S, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.sections.iter().map(|section| (&section.id, &section.items)))
            .finish()
    }
}

/// Incremental snapshot construction.
///
/// Appends are recorded as-is; all validation happens in [`build`], which
/// reports the first problem found.
///
/// [`build`]: SnapshotBuilder::build
///
/// # Example
///
/// ```rust,ignore
/// let snapshot = SnapshotBuilder::new()
///     .append_section(Section::Only)
///     .append_items(items)
///     .build()?;
/// ```
pub struct SnapshotBuilder<S, T> {
    sections: Vec<(S, Vec<T>)>,
    error: Option<SnapshotError>,
}

impl<S: SectionIdentifier, T: Identifiable> SnapshotBuilder<S, T> {
    /// Start an empty builder.
    pub const fn new() -> Self {
        Self {
            sections: Vec::new(),
            error: None,
        }
    }

    /// Append a new, empty section at the end.
    #[must_use]
    pub fn append_section(mut self, section: S) -> Self {
        if self.sections.iter().any(|(existing, _)| *existing == section) {
            self.fail(SnapshotError::DuplicateSection(format!("{section:?}")));
        } else {
            self.sections.push((section, Vec::new()));
        }
        self
    }

    /// Append items to the last section.
    #[must_use]
    pub fn append_items(mut self, items: impl IntoIterator<Item = T>) -> Self {
        match self.sections.last_mut() {
            Some((_, section_items)) => section_items.extend(items),
            None => self.fail(SnapshotError::NoSection),
        }
        self
    }

    /// Append items to a specific section.
    #[must_use]
    pub fn append_items_to(mut self, section: &S, items: impl IntoIterator<Item = T>) -> Self {
        match self.sections.iter_mut().find(|(id, _)| id == section) {
            Some((_, section_items)) => section_items.extend(items),
            None => self.fail(SnapshotError::UnknownSection(format!("{section:?}"))),
        }
        self
    }

    /// Validate and produce the snapshot.
    pub fn build(self) -> Result<Snapshot<S, T>, SnapshotError> {
        if let Some(err) = self.error {
            return Err(err);
        }

        let mut snapshot = Snapshot::empty();
        for (section_idx, (section, items)) in self.sections.into_iter().enumerate() {
            let mut ids = Vec::with_capacity(items.len());
            for (item_idx, item) in items.into_iter().enumerate() {
                let id = item.id();
                if snapshot.items.contains_key(&id) {
                    return Err(SnapshotError::DuplicateItem(format!("{id:?}")));
                }
                snapshot
                    .locations
                    .insert(id.clone(), IndexPath::new(section_idx, item_idx));
                ids.push(id.clone());
                snapshot.items.insert(id, item);
            }
            snapshot.section_index.insert(section.clone(), section_idx);
            snapshot.sections.push(SectionEntry { id: section, items: ids });
        }

        Ok(snapshot)
    }

    /// Keep the first error only.
    fn fail(&mut self, err: SnapshotError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }
}

impl<S: SectionIdentifier, T: Identifiable> Default for SnapshotBuilder<S, T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: char,
        name: &'static str,
    }

    impl Identifiable for Item {
        type Id = char;

        fn id(&self) -> char {
            self.id
        }
    }

    const fn item(id: char, name: &'static str) -> Item {
        Item { id, name }
    }

    #[test]
    fn test_build_preserves_order() {
        let snapshot: Snapshot<u8, Item> = Snapshot::build([
            (1, vec![item('A', "a"), item('B', "b")]),
            (2, vec![item('C', "c")]),
        ])
        .unwrap();

        assert_eq!(snapshot.number_of_sections(), 2);
        assert_eq!(snapshot.number_of_items(), 3);
        assert_eq!(snapshot.section_ids().copied().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(snapshot.item_ids(&1).unwrap(), &['A', 'B']);
        assert_eq!(snapshot.index_path(&'C'), Some(IndexPath::new(1, 0)));
        assert_eq!(snapshot.section_of(&'B'), Some(&1));
        assert_eq!(snapshot.item(&'B').unwrap().name, "b");
    }

    #[test]
    fn test_iter_in_display_order() {
        let snapshot: Snapshot<u8, Item> = Snapshot::build([
            (1, vec![item('B', "b")]),
            (0, vec![item('A', "a"), item('C', "c")]),
        ])
        .unwrap();

        let order: Vec<(IndexPath, char)> = snapshot.iter().map(|(path, item)| (path, item.id)).collect();
        assert_eq!(
            order,
            vec![
                (IndexPath::new(0, 0), 'B'),
                (IndexPath::new(1, 0), 'A'),
                (IndexPath::new(1, 1), 'C'),
            ]
        );
    }

    #[test]
    fn test_duplicate_item_within_section() {
        let result: Result<Snapshot<u8, Item>, _> =
            Snapshot::build([(0, vec![item('A', "a"), item('A', "again")])]);
        assert_eq!(result.unwrap_err(), SnapshotError::DuplicateItem("'A'".to_string()));
    }

    #[test]
    fn test_duplicate_item_across_sections() {
        let result: Result<Snapshot<u8, Item>, _> =
            Snapshot::build([(0, vec![item('A', "a")]), (1, vec![item('A', "a")])]);
        assert!(matches!(result, Err(SnapshotError::DuplicateItem(_))));
    }

    #[test]
    fn test_duplicate_section() {
        let result: Result<Snapshot<u8, Item>, _> = SnapshotBuilder::new()
            .append_section(0)
            .append_section(0)
            .build();
        assert_eq!(result.unwrap_err(), SnapshotError::DuplicateSection("0".to_string()));
    }

    #[test]
    fn test_items_without_section() {
        let result: Result<Snapshot<u8, Item>, _> =
            SnapshotBuilder::new().append_items([item('A', "a")]).build();
        assert_eq!(result.unwrap_err(), SnapshotError::NoSection);
    }

    #[test]
    fn test_append_to_named_section() {
        let snapshot: Snapshot<u8, Item> = SnapshotBuilder::new()
            .append_section(0)
            .append_section(1)
            .append_items_to(&0, [item('A', "a")])
            .append_items([item('B', "b")])
            .build()
            .unwrap();
        assert_eq!(snapshot.item_ids(&0).unwrap(), &['A']);
        assert_eq!(snapshot.item_ids(&1).unwrap(), &['B']);

        let missing: Result<Snapshot<u8, Item>, _> = SnapshotBuilder::new()
            .append_section(0)
            .append_items_to(&7, [item('A', "a")])
            .build();
        assert_eq!(missing.unwrap_err(), SnapshotError::UnknownSection("7".to_string()));
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot: Snapshot<u8, Item> = Snapshot::empty();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.number_of_items(), 0);
        assert!(snapshot.item_ids(&0).is_none());
        assert_eq!(format!("{snapshot:?}"), "{}");
    }
}
