//! Identity: what makes two items "the same" across snapshots.

use std::fmt::Debug;
use std::hash::Hash;

/// An item with a stable identity.
///
/// The identity is assigned once when the item is created and never
/// recomputed. It is the diffing key: two items with equal ids are the same
/// logical item even if their content differs. Content equality is the
/// item's own `PartialEq`.
pub trait Identifiable {
    /// The identity type.
    type Id: Clone + Eq + Hash + Debug;

    /// The item's identity.
    fn id(&self) -> Self::Id;
}

/// Bounds required of a section identifier.
pub trait SectionIdentifier: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> SectionIdentifier for T {}

/// Position of an item: section index, then item index within the section.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct IndexPath {
    /// Section index.
    pub section: usize,
    /// Item index within the section.
    pub item: usize,
}

impl IndexPath {
    /// Create a new index path.
    #[inline]
    pub const fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }
}

impl std::fmt::Debug for IndexPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.section, self.item)
    }
}
