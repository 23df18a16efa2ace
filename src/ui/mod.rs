//! Terminal handling
//!
//! [`Tui`] owns the terminal while the mixer runs: raw mode, alternate
//! screen and a hidden cursor.  Dropping it puts everything back, even
//! when unwinding from an error.

pub mod dashboard;
pub mod theme;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use tracing::warn;

pub use dashboard::Dashboard;
pub use theme::Theme;

pub type Term = Terminal<CrosstermBackend<Stdout>>;

pub struct Tui {
    terminal: Term,
    active: bool,
}

impl Tui {
    /// Enter raw mode and the alternate screen
    pub fn start() -> io::Result<Self> {
        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        let mut this = Self {
            terminal,
            active: false,
        };

        enable_raw_mode()?;
        this.active = true;
        execute!(io::stdout(), EnterAlternateScreen)?;
        this.terminal.hide_cursor()?;
        this.terminal.clear()?;
        Ok(this)
    }

    /// Leave raw mode and the alternate screen
    pub fn stop(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    pub fn terminal(&mut self) -> &mut Term {
        &mut self.terminal
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            warn!("Failed to restore terminal: {}", e);
        }
    }
}
