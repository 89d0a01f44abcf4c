//! Diff module: structural edits between two snapshots.
//!
//! This module contains:
//! - [`Edit`]: one insert, remove, move or update of an item or section
//! - [`EditKinds`]: bitflag summary of the kinds present in a batch
//! - [`Changeset`]: the ordered, deterministic edit list for one transition
//! - `reorder`: longest-increasing-subsequence planning of inserts and moves
//!
//! Edits are *sequential*: every index is valid against the collection as
//! it stands after all earlier edits in the same changeset were applied.
//! Order within a changeset is fixed: item removals, section removals,
//! section insertions, item insertions, section moves, item moves, updates.

mod edit;
mod changeset;
mod reorder;

pub use edit::{Edit, EditKinds};
pub use changeset::Changeset;
