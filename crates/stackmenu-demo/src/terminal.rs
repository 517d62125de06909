//! Terminal management for the demo.
//!
//! This module handles raw mode setup/teardown and blits rendered menu
//! buffers to the screen.

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::Print,
    terminal::{
        disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use stackmenu_fwk::RenderedMenu;

/// Error type for terminal operations
#[derive(Debug)]
pub enum TerminalError {
    /// IO error from crossterm
    Io(io::Error),
}

impl std::fmt::Display for TerminalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminalError::Io(e) => write!(f, "Terminal IO error: {}", e),
        }
    }
}

impl std::error::Error for TerminalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TerminalError::Io(e) => Some(e),
        }
    }
}

impl From<io::Error> for TerminalError {
    fn from(err: io::Error) -> Self {
        TerminalError::Io(err)
    }
}

/// Terminal wrapper that manages raw mode and the alternate screen.
///
/// Restores the terminal to its original state on drop, even if the
/// application exits early.
pub struct Terminal {
    out: Stdout,
}

impl Terminal {
    /// Enter raw mode and the alternate screen, and hide the cursor.
    pub fn new() -> Result<Self, TerminalError> {
        enable_raw_mode()?;

        let mut out = io::stdout();
        execute!(out, EnterAlternateScreen, Hide)?;

        Ok(Self { out })
    }

    /// Blit a rendered menu to the top-left of the screen, row by row.
    pub fn draw(&mut self, menu: &RenderedMenu<'_>) -> Result<(), TerminalError> {
        queue!(self.out, Clear(ClearType::All))?;
        for (y, row) in menu.rows().enumerate() {
            let line: String = row.iter().collect();
            queue!(self.out, MoveTo(0, y as u16), Print(line))?;
        }
        self.out.flush()?;
        Ok(())
    }

    /// Clear the screen and show a single line of text.
    pub fn message(&mut self, text: &str) -> Result<(), TerminalError> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0), Print(text))?;
        self.out.flush()?;
        Ok(())
    }

    /// Restore the terminal to its original state.
    ///
    /// This is called automatically on drop, but can be called manually
    /// if you need the terminal back before the struct is dropped.
    pub fn restore(&mut self) -> Result<(), TerminalError> {
        disable_raw_mode()?;
        execute!(self.out, LeaveAlternateScreen, Show)?;
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        // Best effort to restore terminal state
        let _ = self.restore();
    }
}

/// Install a panic hook that restores the terminal before printing the
/// panic message.
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best effort to restore terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);

        original_hook(panic_info);
    }));
}
