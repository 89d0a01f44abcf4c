//! Reconciler Actor: a dedicated thread that owns the reconciler.
//!
//! Applies arriving from any thread are queued on a bounded channel and
//! processed one at a time, so no two applies ever diff against the same
//! baseline. Applies that pile up behind a busy reconciler are coalesced:
//! only the newest snapshot is applied and the others are answered as
//! superseded.

use super::messages::ApplyCommand;
use crate::error::ReconcileError;
use crate::reconciler::{ApplyReport, Presenter, Reconciler, ReconcilerConfig, SnapshotSink};
use crate::snapshot::{Identifiable, SectionIdentifier, Snapshot};
use crossbeam_channel::{bounded, never, select, tick, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Instant;
use tracing::{debug, trace, warn};

/// Handle to the reconciler thread.
///
/// Dropping the actor asks the thread to stop; [`join`](Self::join) also
/// waits for it and returns the presenter.
pub struct ReconcilerActor<S, T: Identifiable, P> {
    thread: Option<JoinHandle<P>>,
    commands: Sender<ApplyCommand<S, T, P>>,
}

impl<S, T, P> ReconcilerActor<S, T, P>
where
    S: SectionIdentifier + Send + 'static,
    T: Identifiable + PartialEq + Send + 'static,
    T::Id: Send,
    P: Presenter<S, T> + Send + 'static,
{
    /// Spawn the reconciler thread with default configuration.
    pub fn spawn(presenter: P) -> Self {
        Self::with_config(presenter, ReconcilerConfig::default())
    }

    /// Spawn the reconciler thread with custom configuration.
    ///
    /// # Panics
    ///
    /// Panics if the OS fails to spawn the thread.
    pub fn with_config(presenter: P, config: ReconcilerConfig) -> Self {
        let (commands, receiver) = bounded(config.command_capacity.max(1));

        let thread = thread::Builder::new()
            .name("diffable-reconciler".to_string())
            .spawn(move || {
                let reconciler = Reconciler::with_config(presenter, config);
                Self::run_loop(reconciler, &receiver)
            })
            .expect("Failed to spawn reconciler thread");

        Self {
            thread: Some(thread),
            commands,
        }
    }

    /// A cloneable handle for submitting work.
    pub fn handle(&self) -> ReconcilerHandle<S, T, P> {
        ReconcilerHandle {
            commands: self.commands.clone(),
        }
    }

    /// Ask the thread to stop after the commands already queued.
    pub fn shutdown(&self) {
        let _ = self.commands.send(ApplyCommand::Shutdown);
    }

    /// Stop the thread and wait for it. Returns the presenter, or `None`
    /// if the thread panicked.
    pub fn join(mut self) -> Option<P> {
        self.shutdown();
        self.thread.take().and_then(|thread| thread.join().ok())
    }

    /// Main loop: one command at a time, animation frames in between.
    fn run_loop(mut reconciler: Reconciler<S, T, P>, commands: &Receiver<ApplyCommand<S, T, P>>) -> P {
        let frames = tick(reconciler.config().frame_interval);
        let idle = never::<Instant>();

        loop {
            let pacing = if reconciler.presenter().is_animating() {
                &frames
            } else {
                &idle
            };

            select! {
                recv(commands) -> command => {
                    let Ok(command) = command else {
                        debug!("all reconciler handles dropped");
                        break;
                    };
                    if !Self::process(&mut reconciler, command, commands) {
                        break;
                    }
                }
                recv(pacing) -> now => {
                    if let Ok(now) = now {
                        reconciler.presenter_mut().tick(now);
                    }
                }
            }
        }

        debug!(generation = reconciler.generation(), "reconciler thread stopping");
        reconciler.into_presenter()
    }

    /// Handle `first` and anything it pulls off the queue. Returns `false`
    /// on shutdown.
    fn process(
        reconciler: &mut Reconciler<S, T, P>,
        first: ApplyCommand<S, T, P>,
        commands: &Receiver<ApplyCommand<S, T, P>>,
    ) -> bool {
        let mut next = Some(first);
        while let Some(command) = next.take() {
            match command {
                ApplyCommand::Apply {
                    mut snapshot,
                    mut animated,
                    mut reply,
                } => {
                    while let Ok(queued) = commands.try_recv() {
                        match queued {
                            ApplyCommand::Apply {
                                snapshot: newer,
                                animated: newer_animated,
                                reply: newer_reply,
                            } => {
                                trace!("coalescing queued apply");
                                send_superseded(reply, reconciler.generation());
                                snapshot = newer;
                                animated = newer_animated;
                                reply = newer_reply;
                            }
                            other => {
                                next = Some(other);
                                break;
                            }
                        }
                    }

                    let report = reconciler.apply(snapshot, animated);
                    if let Some(reply) = reply {
                        let _ = reply.send(report);
                    }
                }
                ApplyCommand::WithPresenter(f) => f(reconciler.presenter_mut()),
                ApplyCommand::Shutdown => return false,
            }
        }
        true
    }
}

impl<S, T: Identifiable, P> Drop for ReconcilerActor<S, T, P> {
    fn drop(&mut self) {
        if self.thread.is_some() {
            let _ = self.commands.send(ApplyCommand::Shutdown);
        }
    }
}

fn send_superseded(reply: Option<Sender<ApplyReport>>, generation: u64) {
    if let Some(reply) = reply {
        let _ = reply.send(ApplyReport {
            generation,
            superseded: true,
            ..ApplyReport::default()
        });
    }
}

/// Cloneable sender side of a [`ReconcilerActor`].
pub struct ReconcilerHandle<S, T: Identifiable, P> {
    commands: Sender<ApplyCommand<S, T, P>>,
}

impl<S, T: Identifiable, P> Clone for ReconcilerHandle<S, T, P> {
    fn clone(&self) -> Self {
        Self {
            commands: self.commands.clone(),
        }
    }
}

impl<S, T: Identifiable, P> ReconcilerHandle<S, T, P> {
    /// Queue a snapshot without waiting for it.
    pub fn apply(&self, snapshot: Snapshot<S, T>, animated: bool) -> Result<(), ReconcileError> {
        self.send(ApplyCommand::Apply {
            snapshot,
            animated,
            reply: None,
        })
    }

    /// Queue a snapshot and get a token to wait on its outcome.
    pub fn submit(&self, snapshot: Snapshot<S, T>, animated: bool) -> Result<PendingApply, ReconcileError> {
        let (reply, outcome) = bounded(1);
        self.send(ApplyCommand::Apply {
            snapshot,
            animated,
            reply: Some(reply),
        })?;
        Ok(PendingApply { outcome })
    }

    /// Queue a snapshot and block until it has been applied or superseded.
    pub fn apply_and_wait(&self, snapshot: Snapshot<S, T>, animated: bool) -> Result<ApplyReport, ReconcileError> {
        self.submit(snapshot, animated)?.wait()
    }

    /// Run `f` against the presenter on the reconciler thread.
    pub fn with_presenter(&self, f: impl FnOnce(&mut P) + Send + 'static) -> Result<(), ReconcileError> {
        self.send(ApplyCommand::WithPresenter(Box::new(f)))
    }

    fn send(&self, command: ApplyCommand<S, T, P>) -> Result<(), ReconcileError> {
        self.commands.send(command).map_err(|_| {
            warn!("reconciler thread is gone");
            ReconcileError::Disconnected
        })
    }
}

impl<S, T: Identifiable, P> SnapshotSink<S, T> for ReconcilerHandle<S, T, P> {
    fn submit(&mut self, snapshot: Snapshot<S, T>, animated: bool) -> Result<(), ReconcileError> {
        self.apply(snapshot, animated)
    }
}

/// Outcome of a submitted apply, available once the actor gets to it.
#[derive(Debug)]
pub struct PendingApply {
    outcome: Receiver<ApplyReport>,
}

impl PendingApply {
    /// Block until the apply has been processed.
    pub fn wait(self) -> Result<ApplyReport, ReconcileError> {
        self.outcome.recv().map_err(|_| ReconcileError::Disconnected)
    }

    /// The outcome, if already available.
    pub fn try_wait(&self) -> Option<ApplyReport> {
        self.outcome.try_recv().ok()
    }
}
