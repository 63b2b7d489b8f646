//! Shortcut catalog for vimpracti - Vim key tables

mod catalog;

pub use catalog::{Catalog, DuplicatePolicy, Shortcut, ShortcutGroup};
