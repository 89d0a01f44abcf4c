//! Presenter: the verb set the reconciler needs from the presentation layer.

use super::collection::CellCollection;
use crate::diff::Changeset;
use crate::snapshot::Identifiable;
use std::time::{Duration, Instant};

/// How a committed batch is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transition {
    /// Show the final state at once.
    #[default]
    Immediate,
    /// Animate from the previous state over `duration`.
    Animated {
        /// Total animation time.
        duration: Duration,
    },
}

impl Transition {
    /// Whether this transition animates.
    pub const fn is_animated(&self) -> bool {
        matches!(self, Self::Animated { .. })
    }
}

/// Progress clock for an animated transition.
#[derive(Debug, Clone, Copy)]
pub struct TransitionClock {
    started: Instant,
    duration: Duration,
}

impl TransitionClock {
    /// Start a clock at `now`.
    pub const fn start(now: Instant, duration: Duration) -> Self {
        Self {
            started: now,
            duration,
        }
    }

    /// Progress in `0.0..=1.0`. A zero duration is always complete.
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Whether the transition has run its course.
    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }
}

/// The presentation layer, as seen by the reconciler.
///
/// The reconciler owns the ordered [`CellCollection`] and performs the
/// insert and move verbs on it; the presenter owns cell creation, content,
/// recycling and painting. Nothing is painted until [`present`] receives
/// the whole batch, so readers never observe a partially applied state.
///
/// [`present`]: Presenter::present
pub trait Presenter<S, T: Identifiable> {
    /// The visual cell type.
    type Cell;

    /// Create a cell for an item entering the collection.
    ///
    /// Called exactly once per inserted item and never for unchanged items.
    /// Must be total.
    fn render(&mut self, item: &T) -> Self::Cell;

    /// Push new content into an existing cell.
    fn update_content(&mut self, cell: &mut Self::Cell, item: &T);

    /// Take back a cell leaving the collection.
    fn remove_cell(&mut self, cell: Self::Cell);

    /// Commit a batch: `cells` is the collection after every edit in
    /// `changeset` has been applied.
    fn present(
        &mut self,
        cells: &CellCollection<S, T::Id, Self::Cell>,
        changeset: &Changeset<S, T::Id>,
        transition: Transition,
    );

    /// Advance an in-flight transition. Returns whether it is still running.
    fn tick(&mut self, _now: Instant) -> bool {
        false
    }

    /// Whether a transition is in flight.
    fn is_animating(&self) -> bool {
        false
    }

    /// Jump an in-flight transition to its final frame.
    fn finish_transition(&mut self) {}
}
