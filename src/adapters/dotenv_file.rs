// SPDX-License-Identifier: MIT OR Apache-2.0

//! `.env` file support.
//!
//! Parsing is done by `dotenvy`, which accepts the usual grammar:
//!
//! ```text
//! # comment
//! export WP_HOME=https://example.com
//! DB_PASSWORD="p@ss \"quoted\""
//! AUTH_KEY='literal $value'
//! WP_ENV=staging   # trailing comment
//! ```
//!
//! Unquoted and double-quoted values go through `dotenvy`'s `$VAR`
//! substitution; single-quoted values are taken literally.
//!
//! [`DotenvFileAdapter`] exposes such a file as an [`EnvironmentReader`].

use crate::adapters::read_capped;
use crate::domain::{ConfigError, ConfigKey, ConfigValue, Result};
use crate::ports::{ConfigParser, EnvironmentReader};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Maximum allowed size for `.env` files (1MB)
const MAX_DOTENV_FILE_SIZE: u64 = 1024 * 1024;

/// Parser for `.env` content. Every value is text.
#[derive(Debug, Clone, Default)]
pub struct DotenvParser;

impl DotenvParser {
    /// Creates a new parser.
    pub fn new() -> Self {
        DotenvParser
    }

    /// Parses content into raw `(name, value)` pairs, in file order.
    pub fn parse_pairs(&self, content: &str) -> Result<Vec<(String, String)>> {
        dotenvy::from_read_iter(content.as_bytes())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| ConfigError::ParseError {
                message: format!("Failed to parse .env content: {}", e),
                source: Some(Box::new(e)),
            })
    }
}

impl ConfigParser for DotenvParser {
    fn parse(&self, content: &str) -> Result<Vec<(ConfigKey, ConfigValue)>> {
        Ok(self
            .parse_pairs(content)?
            .into_iter()
            .map(|(name, value)| (ConfigKey::from(name), ConfigValue::from(value)))
            .collect())
    }

    fn supported_extensions(&self) -> &[&str] {
        &["env"]
    }
}

/// Quotes a value so `.env` readers and POSIX shells read it back verbatim.
///
/// Anything beyond a plain word is single-quoted, which disables both shell
/// expansion and `dotenvy` substitution.
///
/// # Examples
///
/// ```
/// use mantle::adapters::dotenv_file::quote_value;
///
/// assert_eq!(quote_value("utf8mb4"), "utf8mb4");
/// assert_eq!(quote_value(""), "''");
/// assert_eq!(quote_value("a b"), "'a b'");
/// assert_eq!(quote_value("it's"), r"'it'\''s'");
/// ```
pub fn quote_value(value: &str) -> String {
    let plain = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_-./:@%+,".contains(c));
    if plain {
        return value.to_string();
    }

    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Environment reader backed by a `.env` file.
///
/// # Priority
///
/// `.env` files have a priority of 1, so the process environment overrides
/// them. When a file sets the same name twice, the later line wins.
///
/// # Examples
///
/// ```rust,no_run
/// use mantle::adapters::DotenvFileAdapter;
/// use mantle::ports::EnvironmentReader;
///
/// let adapter = DotenvFileAdapter::from_file("/srv/site/.env").unwrap();
/// let home = adapter.lookup_str("WP_HOME").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct DotenvFileAdapter {
    /// Path to the file
    file_path: PathBuf,
    /// Parsed variables
    values: HashMap<String, String>,
}

impl DotenvFileAdapter {
    /// Reads and parses a `.env` file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file_path = path.as_ref().to_path_buf();

        let content = read_capped(&file_path, MAX_DOTENV_FILE_SIZE).map_err(|e| {
            ConfigError::SourceError {
                source_name: "dotenv".to_string(),
                message: format!("Failed to read {}", file_path.display()),
                source: Some(Box::new(e)),
            }
        })?;

        let values: HashMap<String, String> =
            DotenvParser::new().parse_pairs(&content)?.into_iter().collect();

        tracing::debug!(
            "Loaded {} variables from {}",
            values.len(),
            file_path.display()
        );

        Ok(Self { file_path, values })
    }

    /// Returns the path of the file.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }
}

impl EnvironmentReader for DotenvFileAdapter {
    fn name(&self) -> &str {
        "dotenv"
    }

    fn priority(&self) -> u8 {
        1
    }

    fn lookup(&self, key: &ConfigKey) -> Result<Option<String>> {
        Ok(self.values.get(key.as_str()).cloned())
    }

    fn all_keys(&self) -> Result<Vec<ConfigKey>> {
        Ok(self.values.keys().map(|k| ConfigKey::from(k.as_str())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_pairs_in_file_order() {
        let result = DotenvParser::new()
            .parse_pairs("# header\nexport WP_HOME=https://example.com\n\nDB_NAME=wordpress\nWP_SITE_URL=\n")
            .unwrap();
        assert_eq!(
            result,
            vec![
                ("WP_HOME".to_string(), "https://example.com".to_string()),
                ("DB_NAME".to_string(), "wordpress".to_string()),
                ("WP_SITE_URL".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn test_parse_error() {
        let err = DotenvParser::new().parse_pairs("GOOD=1\nOPEN='never closed\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn test_config_parser_values_are_text() {
        let entries = DotenvParser::new().parse("WP_DEBUG=true\n").unwrap();
        assert_eq!(entries[0].0.as_str(), "WP_DEBUG");
        assert_eq!(entries[0].1, ConfigValue::from("true"));
        assert!(DotenvParser::new().supports("env"));
        assert!(!DotenvParser::new().supports("yaml"));
    }

    #[test]
    fn test_quote_value_round_trips_through_parser() {
        for value in ["plain", "", "two words", "q\"uote", "$HOME", "`id`", "it's"] {
            let line = format!("KEY={}", quote_value(value));
            let pairs = DotenvParser::new().parse_pairs(&line).unwrap();
            assert_eq!(pairs[0].1, value, "line was {}", line);
        }
    }

    #[test]
    fn test_adapter_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "WP_HOME=https://example.com").unwrap();
        writeln!(file, "WP_HOME=https://later.example").unwrap();
        writeln!(file, "DB_PASSWORD=''").unwrap();

        let adapter = DotenvFileAdapter::from_file(file.path()).unwrap();
        assert_eq!(adapter.name(), "dotenv");
        assert_eq!(adapter.priority(), 1);
        assert_eq!(
            adapter.lookup_str("WP_HOME").unwrap().as_deref(),
            Some("https://later.example")
        );
        assert_eq!(adapter.lookup_str("DB_PASSWORD").unwrap().as_deref(), Some(""));
        assert!(adapter.lookup_str("DB_NAME").unwrap().is_none());
        assert_eq!(adapter.all_keys().unwrap().len(), 2);
        assert_eq!(adapter.file_path(), file.path());
    }

    #[test]
    fn test_adapter_missing_file() {
        let err = DotenvFileAdapter::from_file("/nonexistent/mantle/.env").unwrap_err();
        assert!(matches!(err, ConfigError::SourceError { .. }));
    }
}
