//! Reconciler: diffs the applied snapshot against a new one and edits the
//! live collection to match.

use super::collection::CellCollection;
use super::presenter::{Presenter, Transition};
use crate::diff::{Changeset, EditKinds};
use crate::error::ReconcileError;
use crate::snapshot::{Identifiable, SectionIdentifier, Snapshot};
use std::time::Duration;
use tracing::{debug, debug_span};

/// Configuration for the reconciler and its actor.
#[derive(Debug, Clone)]
pub struct ReconcilerConfig {
    /// Length of animated transitions.
    pub animation_duration: Duration,
    /// Interval between animation frames.
    pub frame_interval: Duration,
    /// Capacity of the actor's command channel.
    pub command_capacity: usize,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            animation_duration: Duration::from_millis(300),
            frame_interval: Duration::from_millis(16),
            command_capacity: 16,
        }
    }
}

/// What one `apply` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ApplyReport {
    /// Generation of the adopted snapshot (1 for the first apply).
    pub generation: u64,
    /// Number of edits issued.
    pub edits: usize,
    /// Kinds of edits issued.
    pub kinds: EditKinds,
    /// Whether the batch was presented with an animation.
    pub animated: bool,
    /// Whether this was the first, undiffed build.
    pub full_build: bool,
    /// Whether a newer snapshot replaced this one before it was applied.
    pub superseded: bool,
}

/// Keeps exactly one applied snapshot and brings the visual collection in
/// line with each new one.
///
/// `apply` takes `&mut self`, so two applies can never diff against the
/// same baseline concurrently. Cross-thread callers go through
/// [`ReconcilerActor`](crate::actor::ReconcilerActor).
pub struct Reconciler<S, T, P>
where
    T: Identifiable,
    P: Presenter<S, T>,
{
    presenter: P,
    cells: CellCollection<S, T::Id, P::Cell>,
    baseline: Snapshot<S, T>,
    generation: u64,
    config: ReconcilerConfig,
}

impl<S, T, P> Reconciler<S, T, P>
where
    S: SectionIdentifier,
    T: Identifiable + PartialEq,
    P: Presenter<S, T>,
{
    /// Create a reconciler with default configuration.
    pub fn new(presenter: P) -> Self {
        Self::with_config(presenter, ReconcilerConfig::default())
    }

    /// Create a reconciler with custom configuration.
    pub fn with_config(presenter: P, config: ReconcilerConfig) -> Self {
        Self {
            presenter,
            cells: CellCollection::new(),
            baseline: Snapshot::empty(),
            generation: 0,
            config,
        }
    }

    /// The currently applied snapshot (empty before the first apply).
    pub const fn snapshot(&self) -> &Snapshot<S, T> {
        &self.baseline
    }

    /// Number of snapshots applied so far.
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether any snapshot has been applied.
    pub const fn has_applied(&self) -> bool {
        self.generation > 0
    }

    /// The live visual collection.
    pub const fn cells(&self) -> &CellCollection<S, T::Id, P::Cell> {
        &self.cells
    }

    /// The presenter.
    pub const fn presenter(&self) -> &P {
        &self.presenter
    }

    /// The presenter, mutably.
    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// The configuration.
    pub const fn config(&self) -> &ReconcilerConfig {
        &self.config
    }

    /// Edits `apply` would issue for `snapshot`, without issuing them.
    pub fn diff(&self, snapshot: &Snapshot<S, T>) -> Changeset<S, T::Id> {
        if self.has_applied() {
            Changeset::between(&self.baseline, snapshot)
        } else {
            Changeset::initial(snapshot)
        }
    }

    /// Bring the visual collection in line with `snapshot` and adopt it.
    ///
    /// The first apply is a full build and is never animated. Later applies
    /// diff against the adopted snapshot; if nothing changed no edits are
    /// issued and the presenter is not called.
    pub fn apply(&mut self, snapshot: Snapshot<S, T>, animated: bool) -> ApplyReport {
        let full_build = !self.has_applied();
        let span = debug_span!("apply", generation = self.generation + 1, full_build);
        let _enter = span.enter();

        let changeset = self.diff(&snapshot);
        let transition = if animated && !full_build {
            Transition::Animated {
                duration: self.config.animation_duration,
            }
        } else {
            Transition::Immediate
        };

        if !changeset.is_empty() || full_build {
            if self.presenter.is_animating() {
                self.presenter.finish_transition();
            }
            self.cells.apply(&changeset, &snapshot, &mut self.presenter);
            self.presenter.present(&self.cells, &changeset, transition);
        }

        self.baseline = snapshot;
        self.generation += 1;

        let report = ApplyReport {
            generation: self.generation,
            edits: changeset.len(),
            kinds: changeset.kinds(),
            animated: transition.is_animated() && !changeset.is_empty(),
            full_build,
            superseded: false,
        };
        debug!(edits = report.edits, kinds = ?report.kinds, animated = report.animated, "snapshot applied");
        report
    }

    /// Build a snapshot from `(section, items)` pairs and apply it.
    ///
    /// An invalid snapshot is rejected before anything is touched; the
    /// previously applied state stays as it was.
    pub fn apply_sections<I, J>(&mut self, sections: I, animated: bool) -> Result<ApplyReport, ReconcileError>
    where
        I: IntoIterator<Item = (S, J)>,
        J: IntoIterator<Item = T>,
    {
        let snapshot = Snapshot::build(sections)?;
        Ok(self.apply(snapshot, animated))
    }

    /// Consume the reconciler and return its presenter.
    pub fn into_presenter(self) -> P {
        self.presenter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::Edit;
    use crate::reconciler::{PresenterCall, RecordingPresenter};
    use crate::snapshot::IndexPath;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: char,
        color: &'static str,
        name: &'static str,
    }

    impl Identifiable for Item {
        type Id = char;

        fn id(&self) -> char {
            self.id
        }
    }

    const fn item(id: char, color: &'static str, name: &'static str) -> Item {
        Item { id, color, name }
    }

    fn a() -> Item {
        item('A', "red", "Roger")
    }

    fn b() -> Item {
        item('B', "blue", "Bill")
    }

    fn c() -> Item {
        item('C', "green", "Jeff")
    }

    type TestReconciler = Reconciler<u8, Item, RecordingPresenter<u8, Item>>;

    fn reconciler() -> TestReconciler {
        Reconciler::new(RecordingPresenter::new())
    }

    fn snapshot(items: Vec<Item>) -> Snapshot<u8, Item> {
        Snapshot::build([(0, items)]).unwrap()
    }

    fn names(reconciler: &TestReconciler) -> Vec<&'static str> {
        reconciler.presenter().layout()[0].1.iter().map(|item| item.name).collect()
    }

    #[test]
    fn test_first_apply_is_full_build_without_animation() {
        let mut reconciler = reconciler();
        let report = reconciler.apply(snapshot(vec![a(), b(), c()]), true);

        assert!(report.full_build);
        assert!(!report.animated);
        assert_eq!(report.generation, 1);
        assert_eq!(
            reconciler.presenter().calls(),
            &[
                PresenterCall::Render('A'),
                PresenterCall::Render('B'),
                PresenterCall::Render('C'),
                PresenterCall::Present {
                    edits: 4,
                    kinds: EditKinds::INSERT | EditKinds::SECTION,
                    transition: Transition::Immediate,
                },
            ]
        );
        assert_eq!(names(&reconciler), vec!["Roger", "Bill", "Jeff"]);
    }

    #[test]
    fn test_first_apply_of_empty_snapshot_still_presents() {
        let mut reconciler = reconciler();
        let report = reconciler.apply(Snapshot::empty(), false);

        assert!(report.full_build);
        assert_eq!(report.edits, 0);
        assert_eq!(reconciler.presenter().calls().len(), 1);
    }

    #[test]
    fn test_rename_updates_one_cell_in_place() {
        let mut reconciler = reconciler();
        reconciler.apply(snapshot(vec![a(), b(), c()]), true);
        reconciler.presenter_mut().clear();

        let report = reconciler.apply(snapshot(vec![a(), b(), item('C', "green", "Billy Bob")]), true);

        assert_eq!(report.edits, 1);
        assert_eq!(report.kinds, EditKinds::UPDATE);
        assert!(report.animated);
        assert_eq!(reconciler.presenter().render_count(), 0);
        assert_eq!(reconciler.presenter().remove_count(), 0);
        assert_eq!(
            reconciler.presenter().batches(),
            &[vec![Edit::UpdateItem {
                id: 'C',
                at: IndexPath::new(0, 2)
            }]]
        );
        assert_eq!(names(&reconciler), vec!["Roger", "Bill", "Billy Bob"]);

        let cell = &reconciler.cells().get(IndexPath::new(0, 2)).unwrap().cell;
        assert_eq!(cell.updates, 1);
    }

    #[test]
    fn test_reorder_is_moves_only() {
        let mut reconciler = reconciler();
        reconciler.apply(snapshot(vec![a(), b(), c()]), false);
        reconciler.presenter_mut().clear();

        let report = reconciler.apply(snapshot(vec![c(), a(), b()]), false);

        assert_eq!(report.kinds, EditKinds::MOVE);
        assert_eq!(report.edits, 1);
        assert_eq!(reconciler.presenter().update_count(), 0);
        assert_eq!(names(&reconciler), vec!["Jeff", "Roger", "Bill"]);
    }

    #[test]
    fn test_removal_recycles_one_cell() {
        let mut reconciler = reconciler();
        reconciler.apply(snapshot(vec![a(), b(), c()]), false);
        reconciler.presenter_mut().clear();

        let report = reconciler.apply(snapshot(vec![a(), c()]), true);

        assert_eq!(report.kinds, EditKinds::REMOVE);
        assert_eq!(reconciler.presenter().calls()[0], PresenterCall::RemoveCell('B'));
        assert_eq!(names(&reconciler), vec!["Roger", "Jeff"]);
    }

    #[test]
    fn test_reapplying_same_snapshot_is_idle() {
        let mut reconciler = reconciler();
        reconciler.apply(snapshot(vec![a(), b(), c()]), false);
        reconciler.presenter_mut().clear();

        let report = reconciler.apply(snapshot(vec![a(), b(), c()]), true);

        assert_eq!(report.edits, 0);
        assert!(!report.animated);
        assert_eq!(report.generation, 2);
        assert!(reconciler.presenter().calls().is_empty());
    }

    #[test]
    fn test_invalid_snapshot_leaves_state_untouched() {
        let mut reconciler = reconciler();
        reconciler.apply(snapshot(vec![a(), b()]), false);

        let result = reconciler.apply_sections([(0, vec![c(), c()])], true);

        assert!(matches!(result, Err(ReconcileError::InvalidSnapshot(_))));
        assert_eq!(reconciler.generation(), 1);
        assert_eq!(reconciler.snapshot().number_of_items(), 2);
        assert_eq!(names(&reconciler), vec!["Roger", "Bill"]);
    }

    #[test]
    fn test_diff_previews_without_applying() {
        let mut reconciler = reconciler();
        let first = snapshot(vec![a(), b()]);
        assert_eq!(reconciler.diff(&first), Changeset::initial(&first));

        reconciler.apply(first, false);
        let preview = reconciler.diff(&snapshot(vec![b(), a()]));
        assert_eq!(preview.kinds(), EditKinds::MOVE);
        assert_eq!(reconciler.generation(), 1);
    }
}
