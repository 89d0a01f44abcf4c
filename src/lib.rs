//! # Diffable
//!
//! Snapshot-driven list reconciliation for terminal lists.
//!
//! The owner of a list describes the whole desired state as an immutable
//! [`Snapshot`]; the [`Reconciler`] diffs it against the last applied one and
//! issues the smallest set of structural edits (remove, insert, move, update)
//! to bring the visual collection in line, optionally animated.
//!
//! ## Core Concepts
//!
//! - **Identity vs. content**: items are matched by [`Identifiable::id`];
//!   equal identity with different content is an in-place update
//! - **Sequential edits**: each index in a [`Changeset`] is valid after the
//!   edits before it, so presenters apply them with plain `Vec` operations
//! - **Minimal moves**: reorders keep the longest increasing subsequence of
//!   survivors in place and move only the rest
//! - **Actor model**: [`ReconcilerActor`] serializes applies from any thread
//!   and coalesces queued ones
//!
//! ## Example
//!
//! ```rust,ignore
//! use diffable::{Reconciler, RecordingPresenter, Snapshot};
//!
//! let mut reconciler = Reconciler::new(RecordingPresenter::new());
//! let snapshot = Snapshot::build([("only", vec![item_a, item_b])])?;
//! let report = reconciler.apply(snapshot, true);
//! assert!(report.full_build);
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod demo;
pub mod diff;
pub mod error;
pub mod logging;
pub mod pool;
pub mod reconciler;
pub mod snapshot;
pub mod terminal;

// Re-exports for convenience
pub use actor::{InputActor, InputEvent, KeyCode, PendingApply, ReconcilerActor, ReconcilerHandle};
pub use diff::{Changeset, Edit, EditKinds};
pub use error::{ReconcileError, Result, SnapshotError};
pub use pool::{CellPool, PoolStats, Reusable, ReuseTag};
pub use reconciler::{
    ApplyReport, CellCollection, ListOwner, Presenter, PresenterCall, Reconciler, ReconcilerConfig,
    RecordingPresenter, SnapshotSink, Transition,
};
pub use snapshot::{Identifiable, IndexPath, Snapshot, SnapshotBuilder};
pub use terminal::{ListViewConfig, Rgb, RowContent, TerminalList, TerminalSession};
