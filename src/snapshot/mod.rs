//! Snapshot module: immutable declarations of desired list state.
//!
//! This module contains:
//! - [`Identifiable`]: the stable identity every item is diffed by
//! - [`IndexPath`]: a (section, item) position
//! - [`Snapshot`]: ordered sections of item identities plus item content
//! - [`SnapshotBuilder`]: incremental, validating construction

mod identity;
#[allow(clippy::module_inception)]
mod snapshot;

pub use identity::{Identifiable, IndexPath, SectionIdentifier};
pub use snapshot::{SectionEntry, Snapshot, SnapshotBuilder};
