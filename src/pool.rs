//! `CellPool`: recycling of visual cells keyed by reuse tag.
//!
//! Removed cells are reset and parked; the next insertion with the same tag
//! takes a parked cell instead of allocating a new one.

use std::collections::HashMap;
use tracing::trace;

/// A cell that can be handed out again after being reset.
pub trait Reusable {
    /// Clear everything the previous item left in the cell.
    fn prepare_for_reuse(&mut self);
}

/// Identifies cells that are interchangeable for reuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReuseTag(pub &'static str);

/// Counters for pool activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolStats {
    /// Cells built from scratch.
    pub created: u64,
    /// Cells taken from the idle list.
    pub reused: u64,
    /// Cells returned to the pool.
    pub released: u64,
}

/// Pool of idle cells, one free list per reuse tag.
#[derive(Debug)]
pub struct CellPool<C> {
    idle: HashMap<ReuseTag, Vec<C>>,
    max_idle: usize,
    stats: PoolStats,
}

impl<C: Reusable> CellPool<C> {
    /// Create a pool keeping at most 64 idle cells per tag.
    pub fn new() -> Self {
        Self::with_max_idle(64)
    }

    /// Create a pool keeping at most `max_idle` idle cells per tag.
    pub fn with_max_idle(max_idle: usize) -> Self {
        Self {
            idle: HashMap::new(),
            max_idle,
            stats: PoolStats::default(),
        }
    }

    /// Take an idle cell for `tag`, or build one with `make`.
    pub fn dequeue(&mut self, tag: ReuseTag, make: impl FnOnce() -> C) -> C {
        if let Some(cell) = self.idle.get_mut(&tag).and_then(Vec::pop) {
            self.stats.reused += 1;
            trace!(tag = tag.0, "reusing cell");
            cell
        } else {
            self.stats.created += 1;
            make()
        }
    }

    /// Reset `cell` and park it under `tag`.
    ///
    /// Cells beyond the idle limit are dropped.
    pub fn release(&mut self, tag: ReuseTag, mut cell: C) {
        cell.prepare_for_reuse();
        self.stats.released += 1;
        let idle = self.idle.entry(tag).or_default();
        if idle.len() < self.max_idle {
            idle.push(cell);
        }
    }

    /// Number of idle cells parked under `tag`.
    pub fn idle_count(&self, tag: ReuseTag) -> usize {
        self.idle.get(&tag).map_or(0, Vec::len)
    }

    /// Activity counters.
    pub const fn stats(&self) -> PoolStats {
        self.stats
    }

    /// Drop every idle cell.
    pub fn clear(&mut self) {
        self.idle.clear();
    }
}

impl<C: Reusable> Default for CellPool<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TAG: ReuseTag = ReuseTag("row");

    #[derive(Debug, Default, PartialEq)]
    struct Label {
        text: String,
        serial: u32,
    }

    impl Reusable for Label {
        fn prepare_for_reuse(&mut self) {
            self.text.clear();
        }
    }

    #[test]
    fn test_dequeue_creates_when_empty() {
        let mut pool = CellPool::<Label>::new();
        let cell = pool.dequeue(TAG, || Label {
            text: "fresh".into(),
            serial: 1,
        });
        assert_eq!(cell.serial, 1);
        assert_eq!(pool.stats().created, 1);
        assert_eq!(pool.stats().reused, 0);
    }

    #[test]
    fn test_release_resets_and_reuses() {
        let mut pool = CellPool::<Label>::new();
        pool.release(
            TAG,
            Label {
                text: "Roger".into(),
                serial: 7,
            },
        );
        assert_eq!(pool.idle_count(TAG), 1);

        let cell = pool.dequeue(TAG, Label::default);
        assert_eq!(cell.serial, 7);
        assert!(cell.text.is_empty());
        assert_eq!(pool.idle_count(TAG), 0);
        assert_eq!(
            pool.stats(),
            PoolStats {
                created: 0,
                reused: 1,
                released: 1
            }
        );
    }

    #[test]
    fn test_tags_are_separate() {
        let mut pool = CellPool::<Label>::new();
        pool.release(ReuseTag("header"), Label::default());
        assert_eq!(pool.idle_count(TAG), 0);

        let _ = pool.dequeue(TAG, Label::default);
        assert_eq!(pool.stats().created, 1);
        assert_eq!(pool.idle_count(ReuseTag("header")), 1);
    }

    #[test]
    fn test_max_idle_drops_excess() {
        let mut pool = CellPool::<Label>::with_max_idle(1);
        pool.release(TAG, Label::default());
        pool.release(TAG, Label::default());
        assert_eq!(pool.idle_count(TAG), 1);
        assert_eq!(pool.stats().released, 2);
    }
}
