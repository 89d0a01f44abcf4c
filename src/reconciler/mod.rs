//! Reconciler module: applying snapshots to a live visual collection.
//!
//! This module contains:
//! - [`Reconciler`]: holds the applied snapshot and issues edits
//! - [`Presenter`]: the verb set expected from the presentation layer
//! - [`CellCollection`]: the ordered (identity, cell) slots being edited
//! - [`RecordingPresenter`]: a headless presenter for tests and tooling
//! - [`ListOwner`]: an explicit owner that submits on every mutation

mod collection;
mod owner;
mod presenter;
#[allow(clippy::module_inception)]
mod reconciler;
mod recording;

pub use collection::{CellCollection, SectionSlots, Slot};
pub use owner::{ListOwner, SnapshotSink};
pub use presenter::{Presenter, Transition, TransitionClock};
pub use reconciler::{ApplyReport, Reconciler, ReconcilerConfig};
pub use recording::{PresenterCall, RecordedCell, RecordingPresenter};
