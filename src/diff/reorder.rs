//! Reorder planning: turn one ordered list into another with few moves.
//!
//! Survivors whose relative order already matches the target form a longest
//! increasing subsequence; those stay put ("anchored"). Everything else is
//! either inserted (new) or moved (survivor out of order), each placed right
//! after its nearest anchored predecessor in target order. Anchored elements
//! always appear in target order, so once every element is anchored the
//! working list equals the target.
//!
//! Indices are prefix counts in a Fenwick tree over precomputed slots, so a
//! plan costs O(n log n) even when most elements move.

use std::collections::HashMap;
use std::hash::Hash;

/// Sequential inserts and moves that turn `current` into `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ReorderPlan<K> {
    /// `(element, index)` insertions, in target order.
    pub inserts: Vec<(K, usize)>,
    /// Working order once inserts are applied and before any move.
    pub staged: Vec<K>,
    /// `(element, from, to)` moves, in target order.
    pub moves: Vec<(K, usize, usize)>,
}

/// Indices into `seq` of a longest strictly increasing subsequence.
///
/// Patience sorting with predecessor links, O(n log n). Ties resolve the
/// same way on every run.
pub(crate) fn longest_increasing_subsequence(seq: &[usize]) -> Vec<usize> {
    let mut tails: Vec<usize> = Vec::new();
    let mut prev: Vec<Option<usize>> = vec![None; seq.len()];

    for (i, &value) in seq.iter().enumerate() {
        let pos = tails.partition_point(|&t| seq[t] < value);
        if pos > 0 {
            prev[i] = Some(tails[pos - 1]);
        }
        if pos == tails.len() {
            tails.push(i);
        } else {
            tails[pos] = i;
        }
    }

    let mut result = Vec::with_capacity(tails.len());
    let mut cursor = tails.last().copied();
    while let Some(i) = cursor {
        result.push(i);
        cursor = prev[i];
    }
    result.reverse();
    result
}

/// Plan the inserts and moves from `current` to `target`.
///
/// Every element of `current` must also be in `target`; removals are the
/// caller's job and happen before this plan is applied.
///
/// Runs in O(n log n). The working order is never materialized while
/// planning: each element gets a fixed slot in that order (see
/// [`SlotOrder`]) and indices are prefix counts over occupied slots.
pub(crate) fn plan_reorder<K: Clone + Eq + Hash>(current: &[K], target: &[K]) -> ReorderPlan<K> {
    let target_pos: HashMap<&K, usize> = target.iter().enumerate().map(|(i, k)| (k, i)).collect();

    let survivors: Vec<usize> = current
        .iter()
        .filter_map(|k| target_pos.get(k).copied())
        .collect();
    debug_assert_eq!(survivors.len(), current.len(), "current must be a subset of target");

    let mut in_lis = vec![false; survivors.len()];
    for i in longest_increasing_subsequence(&survivors) {
        in_lis[i] = true;
    }

    let order = SlotOrder::new(&survivors, &in_lis, target.len());
    let mut occupied = RankIndex::new(order.len());
    let mut present = vec![false; target.len()];
    // Target positions waiting to be moved, with their slot before the move.
    let mut loose: Vec<Option<usize>> = vec![None; target.len()];
    for (i, &pos) in survivors.iter().enumerate() {
        present[pos] = true;
        if in_lis[i] {
            occupied.add(order.anchored[pos]);
        } else {
            let slot = order.loose[i];
            occupied.add(slot);
            loose[pos] = Some(slot);
        }
    }

    let mut inserts = Vec::new();
    for (pos, key) in target.iter().enumerate() {
        if present[pos] {
            continue;
        }
        let slot = order.anchored[pos];
        inserts.push((key.clone(), occupied.count_before(slot)));
        occupied.add(slot);
    }

    let staged = (0..order.len())
        .filter(|&slot| occupied.contains(slot))
        .map(|slot| target[order.target_of[slot]].clone())
        .collect();

    let mut moves = Vec::new();
    for (pos, key) in target.iter().enumerate() {
        let Some(slot) = loose[pos] else {
            continue;
        };
        let from = occupied.count_before(slot);
        occupied.remove(slot);
        let anchored = order.anchored[pos];
        let to = occupied.count_before(anchored);
        occupied.add(anchored);
        if from != to {
            moves.push((key.clone(), from, to));
        }
    }

    ReorderPlan {
        inserts,
        staged,
        moves,
    }
}

/// Fixed positions for every element in every working order the plan
/// passes through.
///
/// Elements placed by the plan (inserted, moved, or kept in the LIS) sit in
/// target order, each right after its nearest placed predecessor. A survivor
/// still waiting to move stays just before the first LIS element that
/// followed it in `current`, after anything placed in front of that
/// element. Laying out, for each target position `p`, the waiting survivors
/// bound to `p` (in current order) and then the placed slot of `p` gives one
/// total order that agrees with every intermediate working list.
struct SlotOrder {
    /// Slot of each target position once placed.
    anchored: Vec<usize>,
    /// Slot of each survivor (by index in `current`) while it waits to move.
    loose: Vec<usize>,
    /// Target position of the element occupying each slot.
    target_of: Vec<usize>,
}

impl SlotOrder {
    fn new(survivors: &[usize], in_lis: &[bool], target_len: usize) -> Self {
        // First LIS element after each waiting survivor, or the end.
        let mut bound = vec![target_len; survivors.len()];
        let mut next = target_len;
        for i in (0..survivors.len()).rev() {
            if in_lis[i] {
                next = survivors[i];
            } else {
                bound[i] = next;
            }
        }

        let mut waiting: Vec<Vec<usize>> = vec![Vec::new(); target_len + 1];
        for i in (0..survivors.len()).filter(|&i| !in_lis[i]) {
            waiting[bound[i]].push(i);
        }

        let mut order = Self {
            anchored: vec![0; target_len],
            loose: vec![0; survivors.len()],
            target_of: Vec::with_capacity(target_len + waiting.iter().map(Vec::len).sum::<usize>()),
        };
        for (pos, group) in waiting.iter().enumerate() {
            for &i in group {
                order.loose[i] = order.target_of.len();
                order.target_of.push(survivors[i]);
            }
            if pos < target_len {
                order.anchored[pos] = order.target_of.len();
                order.target_of.push(pos);
            }
        }
        order
    }

    fn len(&self) -> usize {
        self.target_of.len()
    }
}

/// Occupancy over slots with O(log n) rank queries (Fenwick tree).
struct RankIndex {
    tree: Vec<usize>,
    occupied: Vec<bool>,
}

impl RankIndex {
    fn new(len: usize) -> Self {
        Self {
            tree: vec![0; len + 1],
            occupied: vec![false; len],
        }
    }

    fn contains(&self, slot: usize) -> bool {
        self.occupied[slot]
    }

    fn add(&mut self, slot: usize) {
        debug_assert!(!self.occupied[slot]);
        self.occupied[slot] = true;
        let mut i = slot + 1;
        while i < self.tree.len() {
            self.tree[i] += 1;
            i += i & i.wrapping_neg();
        }
    }

    fn remove(&mut self, slot: usize) {
        debug_assert!(self.occupied[slot]);
        self.occupied[slot] = false;
        let mut i = slot + 1;
        while i < self.tree.len() {
            self.tree[i] -= 1;
            i += i & i.wrapping_neg();
        }
    }

    /// Occupied slots strictly before `slot`.
    fn count_before(&self, slot: usize) -> usize {
        let mut count = 0;
        let mut i = slot;
        while i > 0 {
            count += self.tree[i];
            i -= i & i.wrapping_neg();
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(current: &[char], plan: &ReorderPlan<char>) -> Vec<char> {
        let mut working = current.to_vec();
        for (key, index) in &plan.inserts {
            working.insert(*index, *key);
        }
        assert_eq!(working, plan.staged);
        for (_, from, to) in &plan.moves {
            let key = working.remove(*from);
            working.insert(*to, key);
        }
        working
    }

    #[test]
    fn test_lis_basic() {
        assert_eq!(longest_increasing_subsequence(&[]), Vec::<usize>::new());
        assert_eq!(longest_increasing_subsequence(&[0, 1, 2]), vec![0, 1, 2]);
        assert_eq!(longest_increasing_subsequence(&[2, 0, 1]), vec![1, 2]);
        assert_eq!(longest_increasing_subsequence(&[3, 1, 2, 0, 4]).len(), 3);
    }

    #[test]
    fn test_rotation_needs_one_move() {
        let current = ['A', 'B', 'C'];
        let target = ['C', 'A', 'B'];
        let plan = plan_reorder(&current, &target);

        assert!(plan.inserts.is_empty());
        assert_eq!(plan.moves, vec![('C', 2, 0)]);
        assert_eq!(apply(&current, &plan), target);
    }

    #[test]
    fn test_inserts_around_ordered_survivors_need_no_moves() {
        let current = ['A', 'C', 'E'];
        let target = ['X', 'A', 'B', 'C', 'D', 'E', 'F'];
        let plan = plan_reorder(&current, &target);

        assert!(plan.moves.is_empty());
        assert_eq!(plan.inserts.len(), 4);
        assert_eq!(apply(&current, &plan), target);
    }

    #[test]
    fn test_reverse() {
        let current = ['A', 'B', 'C', 'D'];
        let target = ['D', 'C', 'B', 'A'];
        let plan = plan_reorder(&current, &target);

        assert_eq!(plan.moves.len(), 3);
        assert_eq!(apply(&current, &plan), target);
    }

    #[test]
    fn test_mixed_insert_and_move() {
        let current = ['B', 'A'];
        let target = ['A', 'N', 'B'];
        let plan = plan_reorder(&current, &target);

        assert_eq!(plan.inserts.len(), 1);
        assert_eq!(plan.moves.len(), 1);
        assert_eq!(apply(&current, &plan), target);
    }

    #[test]
    fn test_long_reverse() {
        let current: Vec<u32> = (0..5_000).collect();
        let target: Vec<u32> = current.iter().rev().copied().collect();
        let plan = plan_reorder(&current, &target);

        assert!(plan.inserts.is_empty());
        assert_eq!(plan.moves.len(), 4_999);
        let mut working = current;
        for (_, from, to) in &plan.moves {
            let key = working.remove(*from);
            working.insert(*to, key);
        }
        assert_eq!(working, target);
    }

    #[test]
    fn test_waiting_survivors_stay_behind_inserts() {
        // D is out of order and waits in front of B while X and Y are placed.
        let current = ['A', 'D', 'B', 'C'];
        let target = ['A', 'X', 'B', 'Y', 'C', 'D'];
        let plan = plan_reorder(&current, &target);

        assert_eq!(plan.inserts, vec![('X', 1), ('Y', 4)]);
        assert_eq!(plan.staged, vec!['A', 'X', 'D', 'B', 'Y', 'C']);
        assert_eq!(plan.moves, vec![('D', 2, 5)]);
        assert_eq!(apply(&current, &plan), target);
    }

    #[test]
    fn test_plan_is_deterministic() {
        let current = ['E', 'B', 'D', 'A', 'C'];
        let target = ['A', 'B', 'X', 'C', 'D', 'E'];
        let first = plan_reorder(&current, &target);
        for _ in 0..10 {
            assert_eq!(plan_reorder(&current, &target), first);
        }
    }
}
