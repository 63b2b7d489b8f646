//! Feedback line printed after a read

use vimpracti_input::ReadOutcome;

const ESCAPE: &str = "\x1b";

/// Line to print for a read outcome; nothing when the read timed out
pub fn message(outcome: &ReadOutcome) -> Option<String> {
    let keys = outcome.keys()?;
    if keys == ESCAPE {
        Some("You pressed ESC".to_string())
    } else {
        Some(format!("You pressed {}", keys))
    }
}
