// SPDX-License-Identifier: MIT OR Apache-2.0

//! The define-once constant namespace and its frozen form.
//!
//! While the resolver runs it writes into a [`ConstantTable`], where every key
//! can be defined exactly once. When resolution finishes the table is frozen
//! into a [`ResolvedConfig`], which has no mutating methods at all.

use crate::domain::{ConfigError, ConfigKey, ConfigValue, Result};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

/// A define-once namespace of constants, in definition order.
///
/// # Examples
///
/// ```
/// use mantle::domain::ConstantTable;
///
/// let mut table = ConstantTable::new();
/// table.define("DB_CHARSET", "utf8mb4").unwrap();
///
/// assert!(table.define("DB_CHARSET", "latin1").is_err());
/// assert!(!table.define_if_undefined("DB_CHARSET", "latin1"));
/// assert_eq!(table.text("DB_CHARSET"), Some("utf8mb4"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConstantTable {
    order: Vec<ConfigKey>,
    values: HashMap<ConfigKey, ConfigValue>,
}

impl ConstantTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines a constant. Fails if the key is already defined.
    pub fn define(
        &mut self,
        key: impl Into<ConfigKey>,
        value: impl Into<ConfigValue>,
    ) -> Result<()> {
        let key = key.into();
        if self.values.contains_key(&key) {
            return Err(ConfigError::AlreadyDefined {
                key: key.into_string(),
            });
        }
        self.order.push(key.clone());
        self.values.insert(key, value.into());
        Ok(())
    }

    /// Defines a constant unless it already exists. Returns whether it was written.
    pub fn define_if_undefined(
        &mut self,
        key: impl Into<ConfigKey>,
        value: impl Into<ConfigValue>,
    ) -> bool {
        let key = key.into();
        if self.values.contains_key(&key) {
            return false;
        }
        self.order.push(key.clone());
        self.values.insert(key, value.into());
        true
    }

    /// Whether `key` has been defined.
    pub fn is_defined(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Returns the value of `key`, if defined.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.values.get(key)
    }

    /// Returns the text value of `key`, if defined as text.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ConfigValue::as_str)
    }

    /// Number of defined constants.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether nothing has been defined yet.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Freezes the table.
    pub fn freeze(self) -> ResolvedConfig {
        ResolvedConfig {
            order: self.order,
            values: self.values,
        }
    }
}

/// The fully-resolved bootstrap configuration.
///
/// Built once by the resolver and handed to a bootstrap host. There is no way
/// to change a `ResolvedConfig` after it has been built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedConfig {
    order: Vec<ConfigKey>,
    values: HashMap<ConfigKey, ConfigValue>,
}

impl ResolvedConfig {
    /// Returns the value of `key`, if defined.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.values.get(key)
    }

    /// Returns the text value of `key`, if defined as text.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ConfigValue::as_str)
    }

    /// Returns the flag value of `key`, if defined as a flag.
    pub fn flag(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(ConfigValue::as_flag)
    }

    /// Whether `key` is defined.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Number of constants.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the configuration is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates over the constants in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&ConfigKey, &ConfigValue)> {
        self.order
            .iter()
            .filter_map(move |key| self.values.get(key).map(|value| (key, value)))
    }

    /// The constant names in definition order.
    pub fn keys(&self) -> impl Iterator<Item = &ConfigKey> {
        self.order.iter()
    }
}

impl Serialize for ResolvedConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key.as_str(), value)?;
        }
        map.end()
    }
}
