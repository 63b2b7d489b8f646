//! Key event sources and raw-byte translation

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Something that yields key events, waiting at most a given time
pub trait KeySource {
    /// Wait up to `timeout` for the next event.
    ///
    /// `None` means nothing usable arrived: either the wait expired or a
    /// non-key event was consumed. Callers re-check their own deadline.
    fn next_key(&mut self, timeout: Duration) -> io::Result<Option<KeyEvent>>;
}

/// Monotonic time, so deadlines can be tested without sleeping
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Terminal events via crossterm's poll/read
#[derive(Debug, Default)]
pub struct CrosstermKeys;

impl KeySource for CrosstermKeys {
    fn next_key(&mut self, timeout: Duration) -> io::Result<Option<KeyEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) => Ok(Some(key)),
            _ => Ok(None),
        }
    }
}

/// Bytes a raw-mode terminal would have delivered for this key
///
/// Alt sends an escape prefix before the key itself. Empty for keys that
/// are not a single character (arrows, function keys) and for
/// release/repeat events.
pub fn key_to_chars(key: &KeyEvent) -> Vec<char> {
    if key.kind != KeyEventKind::Press {
        return Vec::new();
    }

    let base = match key.code {
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
            // Ctrl-A..Ctrl-Z map onto 0x01..0x1A
            if c.is_ascii_alphabetic() {
                ((c.to_ascii_lowercase() as u8) & 0x1f) as char
            } else {
                return Vec::new();
            }
        }
        KeyCode::Char(c) => c,
        KeyCode::Esc => '\x1b',
        KeyCode::Enter => '\r',
        KeyCode::Tab => '\t',
        KeyCode::Backspace => '\x7f',
        _ => return Vec::new(),
    };

    if key.modifiers.contains(KeyModifiers::ALT) {
        vec!['\x1b', base]
    } else {
        vec![base]
    }
}
