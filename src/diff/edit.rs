//! Edit: the unit of structural change applied to a visual collection.

use crate::snapshot::IndexPath;
use bitflags::bitflags;

bitflags! {
    /// Kinds of edits present in a batch.
    ///
    /// Presenters use this to decide which animations a batch needs.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct EditKinds: u8 {
        /// At least one insertion.
        const INSERT = 0b0000_0001;
        /// At least one removal.
        const REMOVE = 0b0000_0010;
        /// At least one move.
        const MOVE = 0b0000_0100;
        /// At least one content update.
        const UPDATE = 0b0000_1000;
        /// At least one edit addressed a whole section.
        const SECTION = 0b0001_0000;
    }
}

impl std::fmt::Debug for EditKinds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// One structural edit.
///
/// `S` is the section identity type, `K` the item identity type. Positions
/// refer to the collection state right before this edit is applied.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Edit<S, K> {
    /// Remove the item at `at` and recycle its cell.
    RemoveItem {
        /// Item identity.
        id: K,
        /// Current position.
        at: IndexPath,
    },

    /// Remove an (already emptied) section.
    RemoveSection {
        /// Section identity.
        id: S,
        /// Current section index.
        index: usize,
    },

    /// Insert an empty section.
    InsertSection {
        /// Section identity.
        id: S,
        /// Index to insert at.
        index: usize,
    },

    /// Render a new cell for the item and insert it.
    InsertItem {
        /// Item identity.
        id: K,
        /// Position to insert at.
        at: IndexPath,
    },

    /// Take the section out at `from`, then insert it at `to`.
    MoveSection {
        /// Section identity.
        id: S,
        /// Index before the move.
        from: usize,
        /// Index after the move.
        to: usize,
    },

    /// Take the item out at `from`, then insert it at `to`, within one section.
    MoveItem {
        /// Item identity.
        id: K,
        /// Section index.
        section: usize,
        /// Item index before the move.
        from: usize,
        /// Item index after the move.
        to: usize,
    },

    /// Push new content into the existing cell at `at`.
    UpdateItem {
        /// Item identity.
        id: K,
        /// Position of the cell.
        at: IndexPath,
    },
}

impl<S, K> Edit<S, K> {
    /// Flags describing this edit.
    pub const fn kind(&self) -> EditKinds {
        match self {
            Self::RemoveItem { .. } => EditKinds::REMOVE,
            Self::RemoveSection { .. } => EditKinds::REMOVE.union(EditKinds::SECTION),
            Self::InsertSection { .. } => EditKinds::INSERT.union(EditKinds::SECTION),
            Self::InsertItem { .. } => EditKinds::INSERT,
            Self::MoveSection { .. } => EditKinds::MOVE.union(EditKinds::SECTION),
            Self::MoveItem { .. } => EditKinds::MOVE,
            Self::UpdateItem { .. } => EditKinds::UPDATE,
        }
    }

    /// The item this edit addresses, if it is an item edit.
    pub const fn item_id(&self) -> Option<&K> {
        match self {
            Self::RemoveItem { id, .. }
            | Self::InsertItem { id, .. }
            | Self::MoveItem { id, .. }
            | Self::UpdateItem { id, .. } => Some(id),
            Self::RemoveSection { .. } | Self::InsertSection { .. } | Self::MoveSection { .. } => {
                None
            }
        }
    }
}
