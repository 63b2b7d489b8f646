//! vimpracti - Vim shortcut drill
//!
//! Reads one keypress in raw mode and reports what was pressed.

mod config;
mod feedback;

use std::io;

use anyhow::Context;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use vimpracti_catalog::Catalog;
use vimpracti_input::{getch, ReadRequest};

use crate::config::Config;

fn main() -> anyhow::Result<()> {
    init_logging();

    let config = Config::load();
    debug!(?config, path = %Config::config_path().display(), "config loaded");

    let catalog = Catalog::builtin(config.duplicate_keys);
    if let Some(shortcut) = catalog.first_group().and_then(|g| g.entries().first()) {
        debug!(
            keys = shortcut.keys(),
            description = shortcut.description(),
            "prompting"
        );
    }

    let request = ReadRequest::new(config.keypresses, config.base_timeout)
        .context("Invalid reader settings")?;
    let outcome = getch(&request).context("Failed to read from terminal")?;

    if let Some(line) = feedback::message(&outcome) {
        println!("{}", line);
    }

    Ok(())
}

/// Logs go to stderr so stdout only carries the feedback line
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
