// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment-tier override files.
//!
//! After the core constants are defined, the resolver loads one extra file
//! named after `WP_ENV` (for example `staging-env.yaml`). The loader picks a
//! parser by file extension.

use crate::adapters::read_capped;
use crate::domain::{ConfigError, ConfigKey, ConfigValue, Result};
use crate::ports::ConfigParser;
use std::fmt;
use std::io::ErrorKind;
use std::path::Path;

/// Maximum allowed size for tier files (10MB)
const MAX_TIER_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Reads tier files with the first registered parser that handles their extension.
///
/// # Examples
///
/// ```rust,no_run
/// use mantle::adapters::TierFileLoader;
///
/// let loader = TierFileLoader::default();
/// let entries = loader.load("/srv/site/production-env.yaml").unwrap();
/// ```
pub struct TierFileLoader {
    parsers: Vec<Box<dyn ConfigParser>>,
}

impl TierFileLoader {
    /// Creates a loader with no parsers.
    pub fn new() -> Self {
        Self {
            parsers: Vec::new(),
        }
    }

    /// Registers a parser. Earlier registrations win on shared extensions.
    pub fn with_parser(mut self, parser: Box<dyn ConfigParser>) -> Self {
        self.parsers.push(parser);
        self
    }

    /// Reads and parses the tier file at `path`.
    ///
    /// # Returns
    ///
    /// * `Ok(entries)` - The file's constants, in file order
    /// * `Err(ConfigError::MissingTierFile)` - The file does not exist
    /// * `Err(ConfigError::ParseError)` - No parser handles the extension, or the content is malformed
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Vec<(ConfigKey, ConfigValue)>> {
        let path = path.as_ref();

        let content = read_capped(path, MAX_TIER_FILE_SIZE).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                ConfigError::MissingTierFile {
                    path: path.to_path_buf(),
                    source: e,
                }
            } else {
                ConfigError::SourceError {
                    source_name: "tier-file".to_string(),
                    message: format!("Failed to read {}", path.display()),
                    source: Some(Box::new(e)),
                }
            }
        })?;

        let ext = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");
        let parser = self
            .parsers
            .iter()
            .find(|parser| parser.supports(ext))
            .ok_or_else(|| ConfigError::ParseError {
                message: format!(
                    "No parser registered for tier file extension '{}' ({})",
                    ext,
                    path.display()
                ),
                source: None,
            })?;

        let entries = parser.parse(&content)?;
        tracing::debug!(
            "Parsed {} constants from tier file {}",
            entries.len(),
            path.display()
        );
        Ok(entries)
    }
}

impl Default for TierFileLoader {
    /// A loader for YAML (when the `yaml` feature is enabled) and `.env` tier files.
    fn default() -> Self {
        let loader = Self::new();
        #[cfg(feature = "yaml")]
        let loader = loader.with_parser(Box::new(crate::adapters::YamlParser::new()));
        loader.with_parser(Box::new(crate::adapters::DotenvParser::new()))
    }
}

impl fmt::Debug for TierFileLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let extensions: Vec<&str> = self
            .parsers
            .iter()
            .flat_map(|parser| parser.supported_extensions().iter().copied())
            .collect();
        f.debug_struct("TierFileLoader")
            .field("extensions", &extensions)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_tier_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("production-env.env");

        let err = TierFileLoader::default().load(&path).unwrap_err();
        match err {
            ConfigError::MissingTierFile { path: missing, .. } => assert_eq!(missing, path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_dotenv_tier_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("staging-env.env");
        fs::write(&path, "WP_DEBUG=1\nWP_DEBUG_DISPLAY=\n").unwrap();

        let entries = TierFileLoader::default().load(&path).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0.as_str(), "WP_DEBUG");
        assert_eq!(entries[1].1, ConfigValue::from(""));
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn test_yaml_tier_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("development-env.yml");
        fs::write(&path, "WP_DEBUG: true\n").unwrap();

        let entries = TierFileLoader::default().load(&path).unwrap();
        assert_eq!(entries[0].1, ConfigValue::Flag(true));
    }

    #[test]
    fn test_unknown_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("production-env.php");
        fs::write(&path, "<?php define('WP_DEBUG', true);").unwrap();

        let err = TierFileLoader::default().load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        assert!(err.to_string().contains("php"));
    }

    #[test]
    fn test_loader_without_parsers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("production-env.env");
        fs::write(&path, "WP_DEBUG=1\n").unwrap();

        assert!(TierFileLoader::new().load(&path).is_err());
    }

    #[test]
    fn test_debug_lists_extensions() {
        let debug = format!("{:?}", TierFileLoader::default());
        assert!(debug.contains("env"));
    }
}
