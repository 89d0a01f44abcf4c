//! Headless presenter that records every verb it receives.
//!
//! Useful for tests and for driving the reconciler without a terminal.

use super::collection::CellCollection;
use super::presenter::{Presenter, Transition};
use crate::diff::{Changeset, Edit, EditKinds};
use crate::snapshot::Identifiable;

/// One call into the presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterCall<K> {
    /// A cell was rendered for this item.
    Render(K),
    /// This item's cell received new content.
    UpdateContent(K),
    /// This item's cell was recycled.
    RemoveCell(K),
    /// A batch was committed.
    Present {
        /// Number of edits in the batch.
        edits: usize,
        /// Kinds of edits in the batch.
        kinds: EditKinds,
        /// How the batch was shown.
        transition: Transition,
    },
}

/// Cell produced by [`RecordingPresenter`]: a copy of the item it shows.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCell<T> {
    /// Content currently shown.
    pub item: T,
    /// How many times content was pushed into this cell after rendering.
    pub updates: u32,
}

/// Presenter that keeps a log of calls and the last presented layout.
#[derive(Debug)]
pub struct RecordingPresenter<S, T: Identifiable> {
    calls: Vec<PresenterCall<T::Id>>,
    layout: Vec<(S, Vec<T>)>,
    batches: Vec<Vec<Edit<S, T::Id>>>,
}

impl<S, T: Identifiable> RecordingPresenter<S, T> {
    /// Create an empty recorder.
    pub const fn new() -> Self {
        Self {
            calls: Vec::new(),
            layout: Vec::new(),
            batches: Vec::new(),
        }
    }

    /// Every call so far, in order.
    pub fn calls(&self) -> &[PresenterCall<T::Id>] {
        &self.calls
    }

    /// Forget recorded calls and batches (the layout is kept).
    pub fn clear(&mut self) {
        self.calls.clear();
        self.batches.clear();
    }

    /// Edits of every committed batch, in commit order.
    pub fn batches(&self) -> &[Vec<Edit<S, T::Id>>] {
        &self.batches
    }

    /// Sections and their content as of the last commit.
    pub fn layout(&self) -> &[(S, Vec<T>)] {
        &self.layout
    }

    /// Number of `render` calls.
    pub fn render_count(&self) -> usize {
        self.count(|call| matches!(call, PresenterCall::Render(_)))
    }

    /// Number of `update_content` calls.
    pub fn update_count(&self) -> usize {
        self.count(|call| matches!(call, PresenterCall::UpdateContent(_)))
    }

    /// Number of `remove_cell` calls.
    pub fn remove_count(&self) -> usize {
        self.count(|call| matches!(call, PresenterCall::RemoveCell(_)))
    }

    /// The transition of the most recent commit.
    pub fn last_transition(&self) -> Option<Transition> {
        self.calls.iter().rev().find_map(|call| match call {
            PresenterCall::Present { transition, .. } => Some(*transition),
            _ => None,
        })
    }

    fn count(&self, predicate: impl Fn(&PresenterCall<T::Id>) -> bool) -> usize {
        self.calls.iter().filter(|call| predicate(call)).count()
    }
}

impl<S, T: Identifiable> Default for RecordingPresenter<S, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone, T: Identifiable + Clone> Presenter<S, T> for RecordingPresenter<S, T> {
    type Cell = RecordedCell<T>;

    fn render(&mut self, item: &T) -> Self::Cell {
        self.calls.push(PresenterCall::Render(item.id()));
        RecordedCell {
            item: item.clone(),
            updates: 0,
        }
    }

    fn update_content(&mut self, cell: &mut Self::Cell, item: &T) {
        self.calls.push(PresenterCall::UpdateContent(item.id()));
        cell.item = item.clone();
        cell.updates += 1;
    }

    fn remove_cell(&mut self, cell: Self::Cell) {
        self.calls.push(PresenterCall::RemoveCell(cell.item.id()));
    }

    fn present(
        &mut self,
        cells: &CellCollection<S, T::Id, Self::Cell>,
        changeset: &Changeset<S, T::Id>,
        transition: Transition,
    ) {
        self.calls.push(PresenterCall::Present {
            edits: changeset.len(),
            kinds: changeset.kinds(),
            transition,
        });
        self.batches.push(changeset.edits().to_vec());
        self.layout = cells
            .sections()
            .iter()
            .map(|section| {
                (
                    section.id.clone(),
                    section.slots.iter().map(|slot| slot.cell.item.clone()).collect(),
                )
            })
            .collect();
    }
}
