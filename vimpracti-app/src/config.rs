//! Simple configuration for vimpracti
//!
//! Stores reader timing and how duplicate catalog keys are resolved.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::warn;

use vimpracti_catalog::DuplicatePolicy;
use vimpracti_input::DEFAULT_BASE_TIMEOUT;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Number of characters to read per prompt
    pub keypresses: usize,
    /// Base time allowed before the per-keypress bonus
    pub base_timeout: Duration,
    /// Which definition wins when a catalog group repeats a key
    pub duplicate_keys: DuplicatePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            keypresses: 1,
            base_timeout: DEFAULT_BASE_TIMEOUT,
            duplicate_keys: DuplicatePolicy::default(),
        }
    }
}

impl Config {
    /// Load config from the default location
    ///
    /// Returns default config if file doesn't exist or can't be read.
    pub fn load() -> Self {
        let path = Self::config_path();
        Self::load_from(&path).unwrap_or_default()
    }

    /// Load config from a specific path
    pub fn load_from(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    /// Save config to a specific path
    #[cfg(test)]
    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.serialize())
    }

    /// Get the default config file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vimpracti")
            .join("config.txt")
    }

    /// Parse config from simple key=value format
    fn parse(content: &str) -> Self {
        let mut config = Self::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            match key {
                "keypresses" => match value.parse::<usize>() {
                    Ok(n) if n > 0 => config.keypresses = n,
                        _ => warn!(value = %value, "ignoring keypresses, expected a positive integer"),
                },
                "base_timeout_secs" => match value.parse::<u64>() {
                    Ok(secs) => config.base_timeout = Duration::from_secs(secs),
                    Err(_) => warn!(value = %value, "ignoring base_timeout_secs, expected whole seconds"),
                },
                "duplicate_keys" => match DuplicatePolicy::from_name(value) {
                    Some(policy) => config.duplicate_keys = policy,
                    None => warn!(value = %value, "ignoring duplicate_keys, expected first or last"),
                },
                _ => {} // Ignore unknown keys
            }
        }

        config
    }

    /// Serialize config to simple key=value format
    #[cfg(test)]
    fn serialize(&self) -> String {
        let lines = [
            "# vimpracti configuration".to_string(),
            format!("keypresses={}", self.keypresses),
            format!("base_timeout_secs={}", self.base_timeout.as_secs()),
            format!("duplicate_keys={}", self.duplicate_keys.name()),
        ];
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty() {
        assert_eq!(Config::parse(""), Config::default());
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.keypresses, 1);
        assert_eq!(config.base_timeout, Duration::from_secs(4));
        assert_eq!(config.base_timeout, DEFAULT_BASE_TIMEOUT);
        assert_eq!(config.duplicate_keys, DuplicatePolicy::LastWins);
    }

    #[test]
    fn test_oversized_timeout_rejected_by_reader() {
        let config = Config::parse("base_timeout_secs=18446744073709551615\nkeypresses=1");
        assert_eq!(config.base_timeout, Duration::from_secs(u64::MAX));
        assert!(vimpracti_input::ReadRequest::new(config.keypresses, config.base_timeout).is_err());
    }

    #[test]
    fn test_parse_values_with_comments() {
        let content = "# Comment\nkeypresses = 3\nbase_timeout_secs=10\n# trailing\nduplicate_keys=first";
        let config = Config::parse(content);
        assert_eq!(config.keypresses, 3);
        assert_eq!(config.base_timeout, Duration::from_secs(10));
        assert_eq!(config.duplicate_keys, DuplicatePolicy::FirstWins);
    }

    #[test]
    fn test_parse_rejects_bad_values() {
        let content = "keypresses=0\nbase_timeout_secs=soon\nduplicate_keys=random\ncolor=blue";
        assert_eq!(Config::parse(content), Config::default());
    }

    #[test]
    fn test_serialize_roundtrip() {
        let config = Config {
            keypresses: 2,
            base_timeout: Duration::from_secs(6),
            duplicate_keys: DuplicatePolicy::FirstWins,
        };

        assert_eq!(Config::parse(&config.serialize()), config);
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("vimpracti-no-such-dir").join("config.txt");
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir()
            .join(format!("vimpracti-config-{}", std::process::id()))
            .join("config.txt");
        let config = Config {
            keypresses: 4,
            ..Config::default()
        };

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
