//! Crossterm terminal session: raw mode, alternate screen, title and size.
//!
//! `Terminal::enter_guard` hands out a guard whose drop restores the
//! terminal, so an early return or a panic unwinding through the runtime
//! never leaves the shell in raw mode.

use anyhow::Result;
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{
        self, EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode,
        enable_raw_mode,
    },
};
use std::io::stdout;

#[derive(Debug, Default)]
pub struct Terminal {
    raw: bool,
}

/// Restores the terminal when dropped.
pub struct TerminalGuard<'a> {
    terminal: &'a mut Terminal,
}

impl Terminal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current dimensions in (columns, rows).
    pub fn size(&self) -> Result<(u16, u16)> {
        Ok(terminal::size()?)
    }

    pub fn set_title(&self, title: &str) -> Result<()> {
        execute!(stdout(), SetTitle(title))?;
        Ok(())
    }

    /// Switch to raw mode on the alternate screen until the guard drops.
    pub fn enter_guard(&mut self) -> Result<TerminalGuard<'_>> {
        if !self.raw {
            enable_raw_mode()?;
            execute!(stdout(), EnterAlternateScreen, Hide)?;
            self.raw = true;
            tracing::debug!(target: "runtime", "terminal_entered");
        }
        Ok(TerminalGuard { terminal: self })
    }

    /// Leave the alternate screen. A terminal that was never entered is left alone.
    pub fn restore(&mut self) -> Result<()> {
        if self.raw {
            execute!(stdout(), LeaveAlternateScreen, Show)?;
            disable_raw_mode()?;
            self.raw = false;
            tracing::debug!(target: "runtime", "terminal_left");
        }
        Ok(())
    }
}

impl Drop for TerminalGuard<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.terminal.restore() {
            tracing::error!(target: "runtime", error = %e, "terminal_restore_failed");
        }
    }
}
