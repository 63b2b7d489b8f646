//! Scoped raw mode
//!
//! Raw mode disables line buffering and echo so single keystrokes reach
//! the reader immediately. [`RawModeGuard`] puts the terminal back the way
//! it found it when dropped, whichever way the read ends.

use std::io;

use crossterm::terminal;
use tracing::{debug, warn};

/// Terminal line discipline control
pub trait TerminalMode {
    /// Whether raw mode is currently on
    fn is_raw(&self) -> io::Result<bool>;

    /// Switch raw mode on or off
    fn set_raw(&mut self, raw: bool) -> io::Result<()>;
}

impl<T: TerminalMode + ?Sized> TerminalMode for &mut T {
    fn is_raw(&self) -> io::Result<bool> {
        (**self).is_raw()
    }

    fn set_raw(&mut self, raw: bool) -> io::Result<()> {
        (**self).set_raw(raw)
    }
}

/// The process's controlling terminal, via crossterm
#[derive(Debug, Default)]
pub struct CrosstermTerminal;

impl TerminalMode for CrosstermTerminal {
    fn is_raw(&self) -> io::Result<bool> {
        terminal::is_raw_mode_enabled()
    }

    fn set_raw(&mut self, raw: bool) -> io::Result<()> {
        if raw {
            terminal::enable_raw_mode()
        } else {
            terminal::disable_raw_mode()
        }
    }
}

/// Holds the terminal in raw mode until dropped
pub struct RawModeGuard<'a, T: TerminalMode + ?Sized> {
    terminal: &'a mut T,
    was_raw: bool,
}

impl<'a, T: TerminalMode + ?Sized> RawModeGuard<'a, T> {
    /// Enter raw mode, remembering the previous mode
    pub fn acquire(terminal: &'a mut T) -> io::Result<Self> {
        let was_raw = terminal.is_raw()?;
        if !was_raw {
            terminal.set_raw(true)?;
        }
        debug!(was_raw, "raw mode on");
        Ok(Self { terminal, was_raw })
    }
}

impl<T: TerminalMode + ?Sized> Drop for RawModeGuard<'_, T> {
    fn drop(&mut self) {
        if self.was_raw {
            return;
        }
        match self.terminal.set_raw(false) {
            Ok(()) => debug!("raw mode restored"),
            Err(e) => warn!(error = %e, "failed to restore terminal mode"),
        }
    }
}
