// SPDX-License-Identifier: MIT OR Apache-2.0

//! Constant values.
//!
//! Environment variables are always text, but several constants the host
//! platform reads are booleans. [`ConfigValue`] carries both.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The value of a defined constant.
///
/// # Examples
///
/// ```
/// use mantle::domain::config_value::ConfigValue;
///
/// let value = ConfigValue::from("utf8mb4");
/// assert_eq!(value.as_str(), Some("utf8mb4"));
/// assert!(!value.is_falsy());
///
/// assert!(ConfigValue::from(false).is_falsy());
/// assert!(ConfigValue::from("").is_falsy());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// A boolean constant.
    Flag(bool),
    /// A text constant, taken verbatim.
    Text(String),
}

impl ConfigValue {
    /// Reads a flag-valued variable.
    ///
    /// Recognised spellings (case-insensitive) become a [`ConfigValue::Flag`]:
    /// - `true`: "true", "yes", "1", "on"
    /// - `false`: "false", "no", "0", "off"
    ///
    /// Anything else is kept verbatim as text.
    ///
    /// # Examples
    ///
    /// ```
    /// use mantle::domain::config_value::ConfigValue;
    ///
    /// assert_eq!(ConfigValue::parse_flag("On"), ConfigValue::Flag(true));
    /// assert_eq!(ConfigValue::parse_flag("2"), ConfigValue::from("2"));
    /// ```
    pub fn parse_flag(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "true" | "yes" | "1" | "on" => ConfigValue::Flag(true),
            "false" | "no" | "0" | "off" => ConfigValue::Flag(false),
            _ => ConfigValue::Text(raw.to_string()),
        }
    }

    /// Returns the text, or `None` for a flag.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::Text(s) => Some(s),
            ConfigValue::Flag(_) => None,
        }
    }

    /// Returns the flag, or `None` for text.
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            ConfigValue::Flag(b) => Some(*b),
            ConfigValue::Text(_) => None,
        }
    }

    /// Whether the value counts as "not set" for an empty-as-absent fallback.
    ///
    /// Only the empty text and `false` are falsy; `"0"` is not.
    pub fn is_falsy(&self) -> bool {
        match self {
            ConfigValue::Text(s) => s.is_empty(),
            ConfigValue::Flag(b) => !b,
        }
    }

    /// Renders the value for an environment variable.
    ///
    /// Flags become `1` and the empty string.
    pub fn to_env_string(&self) -> String {
        match self {
            ConfigValue::Text(s) => s.clone(),
            ConfigValue::Flag(true) => "1".to_string(),
            ConfigValue::Flag(false) => String::new(),
        }
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::Text(s)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::Text(s.to_string())
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Flag(b)
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Text(s) => f.write_str(s),
            ConfigValue::Flag(b) => write!(f, "{}", b),
        }
    }
}
