//! Property-based invariant tests for snapshot reconciliation.
//!
//! These tests verify, over random pairs of multi-section layouts:
//!
//! 1. Applying old then new leaves the presenter showing exactly new.
//! 2. Re-applying the same snapshot issues no edits and no commit.
//! 3. Diffing is deterministic.
//! 4. Items kept in the same section are never re-rendered or recycled.
//! 5. Edit counts are minimal: inserts, removals and updates match the
//!    identity/content difference, and moves equal survivors minus the
//!    longest run already in order.
//! 6. Edits come in the fixed phase order.

use diffable::{Changeset, Edit, EditKinds, Identifiable, PresenterCall, Reconciler, RecordingPresenter, Snapshot};
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq)]
struct Row {
    id: u32,
    version: u8,
}

impl Identifiable for Row {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }
}

type Layout = Vec<(u8, Vec<Row>)>;

// ── Strategies ────────────────────────────────────────────────────────────

/// Up to four sections in random order, up to 24 unique items spread
/// across them, each with one of two content versions.
fn layout_strategy() -> impl Strategy<Value = Layout> {
    (
        proptest::sample::subsequence((0u8..4).collect::<Vec<_>>(), 0..=4).prop_shuffle(),
        proptest::sample::subsequence((0u32..24).collect::<Vec<_>>(), 0..=24).prop_shuffle(),
        proptest::collection::vec((0usize..4, 0u8..2), 24),
    )
        .prop_map(|(sections, ids, picks)| {
            let mut layout: Layout = sections.into_iter().map(|section| (section, Vec::new())).collect();
            if layout.is_empty() {
                return layout;
            }
            let count = layout.len();
            for (id, (slot, version)) in ids.into_iter().zip(picks) {
                layout[slot % count].1.push(Row { id, version });
            }
            layout
        })
}

// ── Helpers ───────────────────────────────────────────────────────────────

fn build(layout: &Layout) -> Snapshot<u8, Row> {
    Snapshot::build(layout.iter().cloned()).expect("strategy yields unique ids")
}

/// Length of a longest strictly increasing subsequence, O(n²).
fn lis_len(seq: &[usize]) -> usize {
    let mut best = vec![1usize; seq.len()];
    for i in 0..seq.len() {
        for j in 0..i {
            if seq[j] < seq[i] {
                best[i] = best[i].max(best[j] + 1);
            }
        }
    }
    best.into_iter().max().unwrap_or(0)
}

/// Moves needed to reorder the common elements of `old` into `new` order.
fn minimal_moves<K: Eq + std::hash::Hash>(old: &[K], new: &[K]) -> usize {
    let new_pos: HashMap<&K, usize> = new.iter().enumerate().map(|(i, k)| (k, i)).collect();
    let survivors: Vec<usize> = old.iter().filter_map(|k| new_pos.get(k).copied()).collect();
    survivors.len() - lis_len(&survivors)
}

/// Section of every item in `layout`.
fn homes(layout: &Layout) -> HashMap<u32, (u8, &Row)> {
    layout
        .iter()
        .flat_map(|(section, rows)| rows.iter().map(move |row| (row.id, (*section, row))))
        .collect()
}

const fn phase<S, K>(edit: &Edit<S, K>) -> u8 {
    match edit {
        Edit::RemoveItem { .. } => 0,
        Edit::RemoveSection { .. } => 1,
        Edit::InsertSection { .. } => 2,
        Edit::InsertItem { .. } => 3,
        Edit::MoveSection { .. } => 4,
        Edit::MoveItem { .. } => 5,
        Edit::UpdateItem { .. } => 6,
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Round trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn applying_new_shows_exactly_new(old in layout_strategy(), new in layout_strategy()) {
        let mut reconciler = Reconciler::new(RecordingPresenter::new());
        reconciler.apply(build(&old), false);
        reconciler.apply(build(&new), true);

        prop_assert_eq!(reconciler.presenter().layout(), new.as_slice());
        prop_assert_eq!(reconciler.cells().len(), build(&new).number_of_items());
        prop_assert_eq!(reconciler.generation(), 2);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Idempotence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn reapplying_is_idle(layout in layout_strategy()) {
        let mut reconciler = Reconciler::new(RecordingPresenter::new());
        reconciler.apply(build(&layout), false);
        reconciler.presenter_mut().clear();

        let report = reconciler.apply(build(&layout), true);
        prop_assert_eq!(report.edits, 0);
        prop_assert_eq!(report.kinds, EditKinds::empty());
        prop_assert!(reconciler.presenter().calls().is_empty());
        prop_assert_eq!(reconciler.presenter().layout(), layout.as_slice());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Determinism
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn diff_is_deterministic(old in layout_strategy(), new in layout_strategy()) {
        let first = Changeset::between(&build(&old), &build(&new));
        let second = Changeset::between(&build(&old), &build(&new));
        prop_assert_eq!(first, second);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Identity preservation
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn kept_items_keep_their_cells(old in layout_strategy(), new in layout_strategy()) {
        let old_homes = homes(&old);
        let new_homes = homes(&new);
        let kept = |id: &u32| matches!(
            (old_homes.get(id), new_homes.get(id)),
            (Some((a, _)), Some((b, _))) if a == b
        );

        let mut reconciler = Reconciler::new(RecordingPresenter::new());
        reconciler.apply(build(&old), false);
        reconciler.presenter_mut().clear();
        reconciler.apply(build(&new), true);

        for call in reconciler.presenter().calls() {
            match call {
                PresenterCall::Render(id) | PresenterCall::RemoveCell(id) => {
                    prop_assert!(!kept(id), "kept item {} was re-rendered or recycled", id);
                }
                PresenterCall::UpdateContent(id) => {
                    prop_assert!(kept(id));
                    prop_assert_ne!(old_homes[id].1, new_homes[id].1);
                }
                PresenterCall::Present { .. } => {}
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Minimality
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn edit_counts_are_minimal(old in layout_strategy(), new in layout_strategy()) {
        let changeset = Changeset::between(&build(&old), &build(&new));
        let old_homes = homes(&old);
        let new_homes = homes(&new);

        let kept: HashSet<u32> = old_homes
            .iter()
            .filter(|(id, (section, _))| new_homes.get(*id).is_some_and(|(s, _)| s == section))
            .map(|(id, _)| *id)
            .collect();
        let changed = kept.iter().filter(|id| old_homes[*id].1 != new_homes[*id].1).count();

        let count = |f: fn(&Edit<u8, u32>) -> bool| changeset.iter().filter(|edit| f(edit)).count();
        prop_assert_eq!(count(|e| matches!(e, Edit::RemoveItem { .. })), old_homes.len() - kept.len());
        prop_assert_eq!(count(|e| matches!(e, Edit::InsertItem { .. })), new_homes.len() - kept.len());
        prop_assert_eq!(count(|e| matches!(e, Edit::UpdateItem { .. })), changed);

        let old_sections: Vec<u8> = old.iter().map(|(s, _)| *s).collect();
        let new_sections: Vec<u8> = new.iter().map(|(s, _)| *s).collect();
        prop_assert_eq!(
            count(|e| matches!(e, Edit::MoveSection { .. })),
            minimal_moves(&old_sections, &new_sections)
        );

        let mut item_moves = 0;
        for (section, rows) in &new {
            let target: Vec<u32> = rows.iter().map(|row| row.id).collect();
            let current: Vec<u32> = old
                .iter()
                .find(|(s, _)| s == section)
                .map(|(_, rows)| rows.iter().map(|row| row.id).filter(|id| kept.contains(id)).collect())
                .unwrap_or_default();
            item_moves += minimal_moves(&current, &target);
        }
        prop_assert_eq!(count(|e| matches!(e, Edit::MoveItem { .. })), item_moves);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Phase order
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn edits_follow_phase_order(old in layout_strategy(), new in layout_strategy()) {
        let changeset = Changeset::between(&build(&old), &build(&new));
        let phases: Vec<u8> = changeset.iter().map(phase).collect();
        prop_assert!(phases.windows(2).all(|pair| pair[0] <= pair[1]), "phases out of order: {:?}", phases);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Full build from nothing
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn first_apply_renders_every_item_once(layout in layout_strategy()) {
        let mut reconciler = Reconciler::new(RecordingPresenter::new());
        let report = reconciler.apply(build(&layout), true);

        let items: usize = layout.iter().map(|(_, rows)| rows.len()).sum();
        prop_assert!(report.full_build);
        prop_assert!(!report.animated);
        prop_assert_eq!(reconciler.presenter().render_count(), items);
        prop_assert_eq!(report.edits, items + layout.len());
    }
}
