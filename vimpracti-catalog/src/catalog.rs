//! Shortcut catalog: ordered groups of Vim key sequences and their meanings
//!
//! Groups keep their definition order. Keys are unique within a group;
//! duplicates are collapsed when the group is built.

use tracing::warn;

/// Which definition survives when a key appears twice in one group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Keep the first description seen for a key
    FirstWins,
    /// Overwrite with the latest description (literal map semantics)
    #[default]
    LastWins,
}

impl DuplicatePolicy {
    /// Parse the config-file spelling (`first` / `last`)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "first" => Some(DuplicatePolicy::FirstWins),
            "last" => Some(DuplicatePolicy::LastWins),
            _ => None,
        }
    }

    /// Config-file spelling
    pub fn name(&self) -> &'static str {
        match self {
            DuplicatePolicy::FirstWins => "first",
            DuplicatePolicy::LastWins => "last",
        }
    }
}

/// A single key sequence and what it does
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcut {
    keys: String,
    description: String,
}

impl Shortcut {
    pub fn new(keys: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            keys: keys.into(),
            description: description.into(),
        }
    }

    /// Key sequence as typed in normal mode (e.g. "gg")
    pub fn keys(&self) -> &str {
        &self.keys
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// A topic set of shortcuts, optionally named
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutGroup {
    name: Option<String>,
    entries: Vec<Shortcut>,
}

impl ShortcutGroup {
    /// Build a group from `(keys, description)` pairs
    ///
    /// A repeated key keeps the slot of its first occurrence; `policy`
    /// decides whose description ends up in it.
    pub fn from_pairs<I, K, D>(name: Option<&str>, pairs: I, policy: DuplicatePolicy) -> Self
    where
        I: IntoIterator<Item = (K, D)>,
        K: Into<String>,
        D: Into<String>,
    {
        let mut entries: Vec<Shortcut> = Vec::new();

        for (keys, description) in pairs {
            let shortcut = Shortcut::new(keys, description);
            match entries.iter_mut().find(|e| e.keys == shortcut.keys) {
                Some(existing) => {
                    warn!(
                        group = name.unwrap_or("<unnamed>"),
                        keys = %shortcut.keys,
                        policy = policy.name(),
                        "duplicate shortcut key collapsed"
                    );
                    if policy == DuplicatePolicy::LastWins {
                        existing.description = shortcut.description;
                    }
                }
                None => entries.push(shortcut),
            }
        }

        Self {
            name: name.map(str::to_string),
            entries,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Entries in definition order
    pub fn entries(&self) -> &[Shortcut] {
        &self.entries
    }

    /// Find the entry for a key sequence
    pub fn get(&self, keys: &str) -> Option<&Shortcut> {
        self.entries.iter().find(|e| e.keys == keys)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Cursor motions, in the order they are drilled
const MOTIONS: &[(&str, &str)] = &[
    ("k", "Move cursor one character top"),
    ("j", "Move cursor one character down"),
    ("l", "Move cursor one character right"),
    ("h", "Move cursor one character left"),
    ("w", "Move one word"),
    ("e", "Move to the end of the word"),
    ("b", "Move backwards one word"),
    ("W", "Move one word (space separated)"),
    ("E", "Move to the end of the word (no punctuation)"),
    ("B", "Move backwards one word (no punctuation)"),
    ("0", "Move to the beginning of a line"),
    ("^", "Move to first non-blank character in a line"),
    ("$", "Move to the end of a line"),
    ("gg", "Move to the top of a file"),
    ("G", "Move to the end of a file"),
];

/// Read-only collection of shortcut groups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    groups: Vec<ShortcutGroup>,
}

impl Catalog {
    pub fn new(groups: Vec<ShortcutGroup>) -> Self {
        Self { groups }
    }

    /// The built-in Vim table
    pub fn builtin(policy: DuplicatePolicy) -> Self {
        Self::new(vec![ShortcutGroup::from_pairs(
            Some("motion"),
            MOTIONS.iter().copied(),
            policy,
        )])
    }

    pub fn groups(&self) -> impl Iterator<Item = &ShortcutGroup> {
        self.groups.iter()
    }

    pub fn group(&self, name: &str) -> Option<&ShortcutGroup> {
        self.groups.iter().find(|g| g.name() == Some(name))
    }

    /// First group, if any
    pub fn first_group(&self) -> Option<&ShortcutGroup> {
        self.groups.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_order() {
        let catalog = Catalog::builtin(DuplicatePolicy::default());
        assert_eq!(catalog.groups().count(), 1);
        let group = catalog.group("motion").unwrap();
        let keys: Vec<&str> = group.entries().iter().map(|e| e.keys()).collect();
        assert_eq!(
            keys,
            vec!["k", "j", "l", "h", "w", "e", "b", "W", "E", "B", "0", "^", "$", "gg", "G"]
        );
    }

    #[test]
    fn test_lookup() {
        let catalog = Catalog::builtin(DuplicatePolicy::default());
        let group = catalog.first_group().unwrap();
        assert_eq!(
            group.get("gg").map(|e| e.description()),
            Some("Move to the top of a file")
        );
        assert!(group.get("zz").is_none());
        assert!(catalog.group("insert").is_none());
    }

    #[test]
    fn test_repeated_reads_identical() {
        let catalog = Catalog::builtin(DuplicatePolicy::default());
        let first: Vec<Shortcut> = catalog.first_group().unwrap().entries().to_vec();
        let second: Vec<Shortcut> = catalog.first_group().unwrap().entries().to_vec();
        assert_eq!(first, second);
    }

    #[test]
    fn test_duplicates_last_wins() {
        let pairs = [
            ("h", "left"),
            ("j", "down"),
            ("h", "left again"),
            ("h", "still left"),
        ];
        let group = ShortcutGroup::from_pairs(None, pairs, DuplicatePolicy::LastWins);
        assert_eq!(group.len(), 2);
        assert_eq!(group.entries()[0].keys(), "h");
        assert_eq!(group.get("h").unwrap().description(), "still left");
        assert!(group.name().is_none());
    }

    #[test]
    fn test_duplicates_first_wins() {
        let pairs = [("h", "left"), ("j", "down"), ("h", "left again")];
        let group = ShortcutGroup::from_pairs(Some("dup"), pairs, DuplicatePolicy::FirstWins);
        assert_eq!(group.len(), 2);
        assert_eq!(group.get("h").unwrap().description(), "left");
        assert_eq!(group.entries()[1].keys(), "j");
    }

    #[test]
    fn test_policy_names() {
        assert_eq!(DuplicatePolicy::from_name("first"), Some(DuplicatePolicy::FirstWins));
        assert_eq!(DuplicatePolicy::from_name(" Last "), Some(DuplicatePolicy::LastWins));
        assert_eq!(DuplicatePolicy::from_name("middle"), None);
        assert_eq!(DuplicatePolicy::LastWins.name(), "last");
    }
}
