// SPDX-License-Identifier: MIT OR Apache-2.0

//! YAML constant file parser.
//!
//! Tier files written in YAML are a single mapping of constant names to
//! scalar values:
//!
//! ```yaml
//! WP_DEBUG: true
//! WP_DEBUG_LOG: /var/log/wp-debug.log
//! WP_POST_REVISIONS: 5
//! ```

use crate::domain::{ConfigError, ConfigKey, ConfigValue, Result};
use crate::ports::ConfigParser;

/// YAML parser implementation.
///
/// Booleans become flags; strings and numbers become text; `null` becomes
/// the empty text. Nested mappings and sequences are rejected, since a
/// constant holds a single value.
///
/// # Examples
///
/// ```rust
/// use mantle::adapters::YamlParser;
/// use mantle::domain::ConfigValue;
/// use mantle::ports::ConfigParser;
///
/// let parser = YamlParser::new();
/// let entries = parser.parse("WP_DEBUG: true\nWP_POST_REVISIONS: 5").unwrap();
/// assert_eq!(entries[0].1, ConfigValue::Flag(true));
/// assert_eq!(entries[1].1, ConfigValue::from("5"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct YamlParser;

impl YamlParser {
    /// Creates a new YAML parser.
    pub fn new() -> Self {
        YamlParser
    }

    fn scalar(name: &str, value: &serde_yaml::Value) -> Result<ConfigValue> {
        match value {
            serde_yaml::Value::Bool(b) => Ok(ConfigValue::Flag(*b)),
            serde_yaml::Value::String(s) => Ok(ConfigValue::Text(s.clone())),
            serde_yaml::Value::Number(n) => Ok(ConfigValue::Text(n.to_string())),
            serde_yaml::Value::Null => Ok(ConfigValue::Text(String::new())),
            serde_yaml::Value::Tagged(tagged) => Self::scalar(name, &tagged.value),
            serde_yaml::Value::Sequence(_) | serde_yaml::Value::Mapping(_) => {
                Err(ConfigError::ParseError {
                    message: format!("constant '{}' must be a scalar value", name),
                    source: None,
                })
            }
        }
    }
}

impl ConfigParser for YamlParser {
    fn parse(&self, content: &str) -> Result<Vec<(ConfigKey, ConfigValue)>> {
        let blank = content.lines().all(|line| {
            let line = line.trim();
            line.is_empty() || line.starts_with('#')
        });
        if blank {
            return Ok(Vec::new());
        }

        let value: serde_yaml::Value =
            serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
                message: format!("Failed to parse YAML: {}", e),
                source: Some(Box::new(e)),
            })?;

        let map = match value {
            serde_yaml::Value::Mapping(map) => map,
            serde_yaml::Value::Null => return Ok(Vec::new()),
            _ => {
                return Err(ConfigError::ParseError {
                    message: "tier file must be a mapping of constant names".to_string(),
                    source: None,
                })
            }
        };

        let mut entries = Vec::with_capacity(map.len());
        for (key, val) in &map {
            let name = key.as_str().ok_or_else(|| ConfigError::ParseError {
                message: "constant names must be strings".to_string(),
                source: None,
            })?;
            entries.push((ConfigKey::from(name), Self::scalar(name, val)?));
        }
        Ok(entries)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_parser_scalars_in_order() {
        let yaml = "WP_DEBUG: false\nWP_DEBUG_LOG: /tmp/wp.log\nWP_MEMORY_LIMIT: 256\nEMPTY: ~\n";
        let entries = YamlParser::new().parse(yaml).unwrap();

        let names: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, vec!["WP_DEBUG", "WP_DEBUG_LOG", "WP_MEMORY_LIMIT", "EMPTY"]);
        assert_eq!(entries[0].1, ConfigValue::Flag(false));
        assert_eq!(entries[1].1, ConfigValue::from("/tmp/wp.log"));
        assert_eq!(entries[2].1, ConfigValue::from("256"));
        assert_eq!(entries[3].1, ConfigValue::from(""));
    }

    #[test]
    fn test_yaml_parser_quoted_bool_stays_text() {
        let entries = YamlParser::new().parse("WP_CACHE: \"true\"").unwrap();
        assert_eq!(entries[0].1, ConfigValue::from("true"));
    }

    #[test]
    fn test_yaml_parser_empty_document() {
        assert!(YamlParser::new().parse("").unwrap().is_empty());
        assert!(YamlParser::new().parse("# only a comment\n").unwrap().is_empty());
    }

    #[test]
    fn test_yaml_parser_rejects_nesting() {
        let err = YamlParser::new()
            .parse("database:\n  host: localhost\n")
            .unwrap_err();
        assert!(err.to_string().contains("database"));
    }

    #[test]
    fn test_yaml_parser_rejects_non_mapping() {
        assert!(YamlParser::new().parse("- a\n- b\n").is_err());
        assert!(YamlParser::new().parse("just a string").is_err());
    }

    #[test]
    fn test_yaml_parser_invalid_yaml() {
        let err = YamlParser::new().parse("key: [unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn test_yaml_parser_extensions() {
        let parser = YamlParser::new();
        assert!(parser.supports("yaml"));
        assert!(parser.supports("yml"));
        assert!(!parser.supports("env"));
    }
}
