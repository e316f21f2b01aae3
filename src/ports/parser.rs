// SPDX-License-Identifier: MIT OR Apache-2.0

//! Constant file parser trait definition.
//!
//! This module defines the `ConfigParser` trait, which turns the content of a
//! tier file or `.env` file into an ordered list of constants.

use crate::domain::{ConfigKey, ConfigValue, Result};

/// A trait for parsing constant files.
///
/// Files hold flat `NAME = value` pairs; there are no nested keys. Parsers
/// return entries in file order, since the first definition of a name wins.
///
/// # Examples
///
/// ```rust
/// use mantle::ports::ConfigParser;
/// use mantle::domain::{ConfigKey, ConfigValue, Result};
///
/// struct LineParser;
///
/// impl ConfigParser for LineParser {
///     fn parse(&self, content: &str) -> Result<Vec<(ConfigKey, ConfigValue)>> {
///         Ok(content
///             .lines()
///             .filter_map(|line| line.split_once(' '))
///             .map(|(k, v)| (ConfigKey::from(k), ConfigValue::from(v)))
///             .collect())
///     }
///
///     fn supported_extensions(&self) -> &[&str] {
///         &["txt"]
///     }
/// }
///
/// let entries = LineParser.parse("WP_DEBUG yes").unwrap();
/// assert_eq!(entries[0].0.as_str(), "WP_DEBUG");
/// ```
pub trait ConfigParser: Send + Sync {
    /// Parses file content into constants, in file order.
    ///
    /// # Returns
    ///
    /// * `Ok(entries)` - The parsed constants
    /// * `Err(ConfigError::ParseError)` - The content is malformed
    fn parse(&self, content: &str) -> Result<Vec<(ConfigKey, ConfigValue)>>;

    /// Returns the file extensions (without the leading dot) this parser handles.
    fn supported_extensions(&self) -> &[&str];

    /// Whether this parser handles files with extension `ext`.
    fn supports(&self, ext: &str) -> bool {
        self.supported_extensions()
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestParser;

    impl ConfigParser for TestParser {
        fn parse(&self, _content: &str) -> Result<Vec<(ConfigKey, ConfigValue)>> {
            Ok(vec![
                (ConfigKey::from("WP_DEBUG"), ConfigValue::Flag(true)),
                (ConfigKey::from("WP_DEBUG_LOG"), ConfigValue::from("/tmp/debug.log")),
            ])
        }

        fn supported_extensions(&self) -> &[&str] {
            &["test", "tst"]
        }
    }

    #[test]
    fn test_parser_parse_keeps_order() {
        let result = TestParser.parse("dummy content").unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].0.as_str(), "WP_DEBUG");
        assert_eq!(result[1].0.as_str(), "WP_DEBUG_LOG");
    }

    #[test]
    fn test_parser_supports_extension() {
        assert!(TestParser.supports("test"));
        assert!(TestParser.supports("TST"));
        assert!(!TestParser.supports("yaml"));
    }
}
