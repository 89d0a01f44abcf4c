//! `ListOwner`: explicit owner of an item list.
//!
//! Every mutation goes through a method that builds a snapshot of the whole
//! list and submits it. There is no observer: callers change the list by
//! calling [`ListOwner::set_items`] or [`ListOwner::update`].

use super::presenter::Presenter;
use super::reconciler::Reconciler;
use crate::error::ReconcileError;
use crate::snapshot::{Identifiable, SectionIdentifier, Snapshot};
use tracing::warn;

/// Where an owner sends its snapshots.
pub trait SnapshotSink<S, T: Identifiable> {
    /// Submit a snapshot for application.
    fn submit(&mut self, snapshot: Snapshot<S, T>, animated: bool) -> Result<(), ReconcileError>;
}

impl<S, T, P> SnapshotSink<S, T> for Reconciler<S, T, P>
where
    S: SectionIdentifier,
    T: Identifiable + PartialEq,
    P: Presenter<S, T>,
{
    fn submit(&mut self, snapshot: Snapshot<S, T>, animated: bool) -> Result<(), ReconcileError> {
        self.apply(snapshot, animated);
        Ok(())
    }
}

/// Owns an ordered item list shown as a single section.
pub struct ListOwner<S, T, K> {
    section: S,
    items: Vec<T>,
    sink: K,
    animated: bool,
}

impl<S, T, K> ListOwner<S, T, K>
where
    S: SectionIdentifier,
    T: Identifiable + Clone,
    K: SnapshotSink<S, T>,
{
    /// Create an owner and show `items` right away (a full build).
    pub fn new(section: S, items: Vec<T>, mut sink: K) -> Result<Self, ReconcileError> {
        let snapshot = single_section(&section, &items)?;
        sink.submit(snapshot, false)?;
        Ok(Self {
            section,
            items,
            sink,
            animated: true,
        })
    }

    /// Whether later changes are animated (default: yes).
    #[must_use]
    pub const fn with_animation(mut self, animated: bool) -> Self {
        self.animated = animated;
        self
    }

    /// The current items.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// The section the items are shown in.
    pub const fn section(&self) -> &S {
        &self.section
    }

    /// The sink snapshots are submitted to.
    pub const fn sink(&self) -> &K {
        &self.sink
    }

    /// The sink, mutably.
    pub fn sink_mut(&mut self) -> &mut K {
        &mut self.sink
    }

    /// Replace the list and submit it.
    ///
    /// A list with duplicate identities is rejected and the previous list
    /// is kept.
    pub fn set_items(&mut self, items: Vec<T>) -> Result<(), ReconcileError> {
        let snapshot = single_section(&self.section, &items).map_err(|err| {
            warn!(%err, "rejected item list");
            err
        })?;
        self.sink.submit(snapshot, self.animated)?;
        self.items = items;
        Ok(())
    }

    /// Mutate a copy of the list with `f`, then submit it.
    pub fn update(&mut self, f: impl FnOnce(&mut Vec<T>)) -> Result<(), ReconcileError> {
        let mut items = self.items.clone();
        f(&mut items);
        self.set_items(items)
    }

    /// Consume the owner and return its sink.
    pub fn into_sink(self) -> K {
        self.sink
    }
}

fn single_section<S, T>(section: &S, items: &[T]) -> Result<Snapshot<S, T>, ReconcileError>
where
    S: SectionIdentifier,
    T: Identifiable + Clone,
{
    Ok(Snapshot::build([(section.clone(), items.to_vec())])?)
}
