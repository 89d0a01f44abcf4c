//! Actor Model: message-passing concurrency around the reconciler.
//!
//! This module implements a small actor system using crossbeam channels:
//! - **Reconciler Actor**: owns the reconciler, applies snapshots one at a
//!   time and drives animation frames
//! - **Input Actor**: polls terminal events, forwards to the main loop
//! - **Main Loop**: owns the item list and submits snapshots
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     InputEvent      ┌──────────────┐
//! │ Input Thread │ ─────────────────▶  │              │
//! └──────────────┘                     │  Main Loop   │
//!                                      │ (ListOwner)  │
//! ┌──────────────┐    ApplyCommand     │              │
//! │  Reconciler  │ ◀─────────────────  │              │
//! │    Thread    │ ─────────────────▶  │              │
//! └──────────────┘    ApplyReport      └──────────────┘
//! ```

mod input;
mod messages;
mod reconciler_actor;

pub use input::{InputActor, InputConfig};
pub use messages::{ApplyCommand, InputEvent, KeyCode, KeyModifiers};
pub use reconciler_actor::{PendingApply, ReconcilerActor, ReconcilerHandle};
