//! Terminal interface management
//!
//! Handles terminal setup, snapshot-driven rendering, and cleanup. The
//! terminal is restored on drop, so the builder always leaves the shell
//! the way it found it.

use std::io::{self, Stdout};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};

use crate::{
    error::{TinttyError, TinttyResult},
    state::AtomicState,
};

/// Terminal user interface manager
pub struct Tui<S: AtomicState> {
    /// Terminal instance for rendering
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application state
    state: S,
}

impl<S: AtomicState> Tui<S> {
    /// Creates a new TUI instance
    pub fn new(state: S) -> TinttyResult<Self> {
        if !Self::is_real_terminal() {
            return Err(TinttyError::terminal(
                "terminal check",
                (0, 0),
                "Not a real terminal or terminal capabilities not available".to_string(),
            )
            .into());
        }

        let terminal = Self::setup_terminal()?;
        Ok(Self { terminal, state })
    }

    /// Check if we're in a real terminal
    fn is_real_terminal() -> bool {
        if !atty::is(atty::Stream::Stdout) {
            return false;
        }

        match std::env::var("TERM") {
            Ok(term) if term == "dumb" => false,
            Ok(_) => true,
            Err(_) => false,
        }
    }

    /// Sets up the terminal for TUI operation
    fn setup_terminal() -> TinttyResult<Terminal<CrosstermBackend<Stdout>>> {
        let mut stdout = io::stdout();

        execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(|e| {
            TinttyError::terminal(
                "terminal setup",
                (0, 0),
                format!("Failed to setup terminal: {}", e),
            )
        })?;

        terminal::enable_raw_mode().map_err(|e| {
            TinttyError::terminal(
                "terminal setup",
                (0, 0),
                format!("Failed to enable raw mode: {}", e),
            )
        })?;

        Terminal::new(CrosstermBackend::new(stdout)).map_err(|e| {
            TinttyError::terminal(
                "terminal setup",
                (0, 0),
                format!("Failed to create terminal: {}", e),
            )
            .into()
        })
    }

    /// Restores terminal to original state
    fn restore_terminal(&mut self) -> TinttyResult<()> {
        terminal::disable_raw_mode().map_err(|e| {
            TinttyError::terminal(
                "terminal cleanup",
                (0, 0),
                format!("Failed to disable raw mode: {}", e),
            )
        })?;

        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .map_err(|e| {
            TinttyError::terminal(
                "terminal cleanup",
                (0, 0),
                format!("Failed to restore terminal: {}", e),
            )
        })?;

        Ok(self.terminal.show_cursor().map_err(|e| {
            TinttyError::terminal(
                "terminal cleanup",
                (0, 0),
                format!("Failed to show cursor: {}", e),
            )
        })?)
    }

    /// Renders a frame using the provided render function
    pub fn render<F>(&mut self, render_fn: F) -> TinttyResult<()>
    where
        F: FnOnce(&S::Snapshot, Rect, &mut ratatui::Frame<'_>),
    {
        let snapshot = self.state.snapshot();

        Ok(self
            .terminal
            .draw(|frame| {
                let area = frame.area();
                render_fn(&snapshot, area, frame);
            })
            .map(|_| ())
            .map_err(|e| {
                TinttyError::terminal(
                    "rendering",
                    (0, 0),
                    format!("Failed to render frame: {}", e),
                )
            })?)
    }

    /// Returns a reference to the state
    pub fn state(&self) -> &S {
        &self.state
    }
}

impl<S: AtomicState> Drop for Tui<S> {
    fn drop(&mut self) {
        if let Err(e) = self.restore_terminal() {
            eprintln!("Failed to restore terminal: {}", e);
        }
    }
}
