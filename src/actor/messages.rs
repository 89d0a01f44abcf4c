//! Message types for actor communication.
//!
//! These enums define the protocol between the application thread, the
//! reconciler thread and the input thread.

use crate::reconciler::ApplyReport;
use crate::snapshot::{Identifiable, Snapshot};
use crossbeam_channel::Sender;
use std::fmt;

/// Commands sent to the reconciler thread.
pub enum ApplyCommand<S, T: Identifiable, P> {
    /// Apply a snapshot.
    Apply {
        /// The snapshot to converge on.
        snapshot: Snapshot<S, T>,
        /// Whether to animate the change.
        animated: bool,
        /// Where to send the outcome, if anyone is waiting.
        reply: Option<Sender<ApplyReport>>,
    },

    /// Run a closure against the presenter on the reconciler thread.
    WithPresenter(Box<dyn FnOnce(&mut P) + Send>),

    /// Stop the reconciler thread.
    Shutdown,
}

impl<S, T: Identifiable, P> fmt::Debug for ApplyCommand<S, T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Apply {
                snapshot,
                animated,
                reply,
            } => f
                .debug_struct("Apply")
                .field("items", &snapshot.number_of_items())
                .field("animated", animated)
                .field("awaited", &reply.is_some())
                .finish(),
            Self::WithPresenter(_) => f.write_str("WithPresenter"),
            Self::Shutdown => f.write_str("Shutdown"),
        }
    }
}

/// Key codes for keyboard input.
///
/// The subset of crossterm's `KeyCode` a scrolling list reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page Up.
    PageUp,
    /// Page Down.
    PageDown,
    /// Escape key.
    Esc,
}

/// Key modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyModifiers {
    /// Shift key held.
    pub shift: bool,
    /// Control key held.
    pub control: bool,
    /// Alt/Option key held.
    pub alt: bool,
}

impl KeyModifiers {
    /// No modifiers.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
    };

    /// Check if any modifier is active.
    pub const fn any(&self) -> bool {
        self.shift || self.control || self.alt
    }
}

/// Events from the input thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A key was pressed.
    Key {
        /// The key code.
        code: KeyCode,
        /// Modifiers held during keypress.
        modifiers: KeyModifiers,
    },

    /// Mouse wheel.
    Scroll {
        /// Scroll delta (positive = up, negative = down).
        delta: i16,
    },

    /// Terminal was resized.
    Resize {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },

    /// Input thread encountered an error.
    Error(String),

    /// Input thread is shutting down.
    Shutdown,
}

impl InputEvent {
    /// Whether this event asks the application to quit (q, Esc, Ctrl+C).
    pub const fn is_quit(&self) -> bool {
        match self {
            Self::Key { code, modifiers } => matches!(
                (code, modifiers.control),
                (KeyCode::Char('q') | KeyCode::Esc, _) | (KeyCode::Char('c'), true)
            ),
            _ => false,
        }
    }
}
