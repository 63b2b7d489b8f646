//! Timed raw keypress reader
//!
//! Reads exactly N characters with echo and line buffering off. The read
//! owns its deadline: `base_timeout + 1s` per requested keypress. Running out
//! of time is an ordinary outcome, not an error.

use std::io::{self, IsTerminal};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::keys::{key_to_chars, Clock, CrosstermKeys, KeySource, SystemClock};
use crate::terminal::{CrosstermTerminal, RawModeGuard, TerminalMode};

/// Extra time granted per requested keypress
pub const PER_KEYPRESS_BONUS: Duration = Duration::from_secs(1);

/// Default base timeout before the per-keypress bonus
pub const DEFAULT_BASE_TIMEOUT: Duration = Duration::from_secs(4);

/// Longest total wait a request may ask for (one day)
pub const MAX_DEADLINE: Duration = Duration::from_secs(24 * 60 * 60);

/// Errors that can occur while reading keys
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Standard input is not a terminal")]
    NotATerminal,
    #[error("Terminal is already being read")]
    Busy,
    #[error("Invalid request: {0}")]
    InvalidRequest(&'static str),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// How many characters to read and how long to wait for them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadRequest {
    keypresses: usize,
    deadline: Duration,
}

impl ReadRequest {
    /// Validate a request; the total wait must not exceed [`MAX_DEADLINE`]
    pub fn new(keypresses: usize, base_timeout: Duration) -> Result<Self, InputError> {
        if keypresses == 0 {
            return Err(InputError::InvalidRequest("keypresses must be at least 1"));
        }
        let deadline = u32::try_from(keypresses)
            .ok()
            .and_then(|n| PER_KEYPRESS_BONUS.checked_mul(n))
            .and_then(|bonus| base_timeout.checked_add(bonus))
            .filter(|total| *total <= MAX_DEADLINE)
            .ok_or(InputError::InvalidRequest("total timeout must not exceed one day"))?;

        Ok(Self {
            keypresses,
            deadline,
        })
    }

    pub fn keypresses(&self) -> usize {
        self.keypresses
    }

    /// Total time allowed for the whole read: base + 1s per keypress
    pub fn deadline(&self) -> Duration {
        self.deadline
    }
}

impl Default for ReadRequest {
    fn default() -> Self {
        Self {
            keypresses: 1,
            deadline: DEFAULT_BASE_TIMEOUT + PER_KEYPRESS_BONUS,
        }
    }
}

/// Result of a read: all requested characters, or nothing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Keys(String),
    TimedOut,
}

impl ReadOutcome {
    pub fn keys(&self) -> Option<&str> {
        match self {
            ReadOutcome::Keys(keys) => Some(keys),
            ReadOutcome::TimedOut => None,
        }
    }

    pub fn into_keys(self) -> Option<String> {
        match self {
            ReadOutcome::Keys(keys) => Some(keys),
            ReadOutcome::TimedOut => None,
        }
    }
}

/// Reads keys from a source while holding the terminal in raw mode
pub struct KeyReader<T, S, C = SystemClock> {
    terminal: T,
    source: S,
    clock: C,
}

impl<T: TerminalMode, S: KeySource> KeyReader<T, S, SystemClock> {
    pub fn new(terminal: T, source: S) -> Self {
        Self::with_clock(terminal, source, SystemClock)
    }
}

impl<T: TerminalMode, S: KeySource, C: Clock> KeyReader<T, S, C> {
    pub fn with_clock(terminal: T, source: S, clock: C) -> Self {
        Self {
            terminal,
            source,
            clock,
        }
    }

    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    /// Read exactly `request.keypresses()` characters or time out.
    ///
    /// Raw mode is released before returning, including on error and
    /// while unwinding.
    pub fn read(&mut self, request: &ReadRequest) -> Result<ReadOutcome, InputError> {
        let _raw = RawModeGuard::acquire(&mut self.terminal)?;

        let wanted = request.keypresses();
        let deadline = self
            .clock
            .now()
            .checked_add(request.deadline())
            .ok_or(InputError::InvalidRequest("deadline is out of range for this clock"))?;
        debug!(wanted, deadline_ms = request.deadline().as_millis() as u64, "deadline armed");

        let mut keys = String::with_capacity(wanted);
        let mut got = 0;
        while got < wanted {
            let remaining = deadline.saturating_duration_since(self.clock.now());
            if remaining.is_zero() {
                debug!(got, wanted, "deadline passed");
                return Ok(ReadOutcome::TimedOut);
            }

            let Some(key) = self.source.next_key(remaining)? else {
                continue;
            };
            // A tty read stops at `wanted` bytes; the rest of a multi-byte key is dropped
            for c in key_to_chars(&key).into_iter().take(wanted - got) {
                keys.push(c);
                got += 1;
            }
        }

        debug!(wanted, "read complete");
        Ok(ReadOutcome::Keys(keys))
    }
}

/// One terminal read per process at a time
static TERMINAL_IN_USE: AtomicBool = AtomicBool::new(false);

struct TerminalClaim;

impl TerminalClaim {
    fn take() -> Result<Self, InputError> {
        TERMINAL_IN_USE
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| TerminalClaim)
            .map_err(|_| InputError::Busy)
    }
}

impl Drop for TerminalClaim {
    fn drop(&mut self) {
        TERMINAL_IN_USE.store(false, Ordering::Release);
    }
}

/// Read keys from the real terminal on stdin
pub fn getch(request: &ReadRequest) -> Result<ReadOutcome, InputError> {
    read_terminal(
        io::stdin().is_terminal(),
        CrosstermTerminal,
        CrosstermKeys,
        request,
    )
}

fn read_terminal<T: TerminalMode, S: KeySource>(
    is_tty: bool,
    terminal: T,
    source: S,
    request: &ReadRequest,
) -> Result<ReadOutcome, InputError> {
    if !is_tty {
        return Err(InputError::NotATerminal);
    }
    let _claim = TerminalClaim::take()?;

    KeyReader::new(terminal, source).read(request)
}
