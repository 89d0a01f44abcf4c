//! `TerminalSession`: raw mode and alternate screen for the lifetime of a
//! value.
//!
//! Dropping the session restores the terminal, including on early return
//! through `?`.

use crate::error::Result;
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io;
use tracing::debug;

/// Configuration for the terminal session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Whether to use the alternate screen buffer.
    pub alternate_screen: bool,
    /// Whether to capture mouse events (needed for wheel scrolling).
    pub enable_mouse: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            alternate_screen: true,
            enable_mouse: true,
        }
    }
}

/// Guard holding the terminal in raw mode.
pub struct TerminalSession {
    config: SessionConfig,
    width: u16,
    height: u16,
}

impl TerminalSession {
    /// Enter raw mode with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::Io`] if terminal setup fails.
    ///
    /// [`ReconcileError::Io`]: crate::error::ReconcileError::Io
    pub fn start() -> Result<Self> {
        Self::with_config(SessionConfig::default())
    }

    /// Enter raw mode with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup fails.
    pub fn with_config(config: SessionConfig) -> Result<Self> {
        let (width, height) = terminal::size()?;
        terminal::enable_raw_mode()?;

        // From here on, Drop undoes whatever succeeded.
        let session = Self { config, width, height };
        let mut stdout = io::stdout();
        if session.config.alternate_screen {
            execute!(stdout, EnterAlternateScreen)?;
        }
        if session.config.enable_mouse {
            execute!(stdout, EnableMouseCapture)?;
        }
        execute!(stdout, cursor::Hide)?;
        debug!(width, height, "terminal session started");
        Ok(session)
    }

    /// Terminal width at start or last resize.
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Terminal height at start or last resize.
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Record a new terminal size.
    pub const fn handle_resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, cursor::Show);
        if self.config.enable_mouse {
            let _ = execute!(stdout, DisableMouseCapture);
        }
        if self.config.alternate_screen {
            let _ = execute!(stdout, LeaveAlternateScreen);
        }
        let _ = terminal::disable_raw_mode();
        debug!("terminal session restored");
    }
}
