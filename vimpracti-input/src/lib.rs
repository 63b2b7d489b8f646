//! Raw terminal keypress input for vimpracti

mod keys;
mod reader;
mod terminal;

pub use keys::{key_to_chars, Clock, CrosstermKeys, KeySource, SystemClock};
pub use reader::{
    getch, InputError, KeyReader, ReadOutcome, ReadRequest, DEFAULT_BASE_TIMEOUT, MAX_DEADLINE,
    PER_KEYPRESS_BONUS,
};
pub use terminal::{CrosstermTerminal, RawModeGuard, TerminalMode};
