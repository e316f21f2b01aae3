// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layering of several environment readers.
//!
//! The process environment and `.env` files are combined into a single
//! [`EnvironmentReader`]: readers are consulted in priority order and the
//! first one that holds a variable wins.

use crate::domain::{ConfigKey, Result};
use crate::ports::EnvironmentReader;
use std::collections::BTreeSet;

/// An environment reader that queries other readers in priority order.
///
/// Readers with higher priority values are queried first. Among readers with
/// equal priority, the one added first wins.
///
/// # Examples
///
/// ```rust
/// use mantle::adapters::EnvVarAdapter;
/// use mantle::ports::EnvironmentReader;
/// use mantle::service::LayeredEnvironment;
/// use std::collections::HashMap;
///
/// let mut values = HashMap::new();
/// values.insert("WP_ENV".to_string(), "staging".to_string());
///
/// let mut env = LayeredEnvironment::new();
/// env.add_reader(Box::new(EnvVarAdapter::with_values(values)));
/// assert_eq!(env.lookup_str("WP_ENV").unwrap().as_deref(), Some("staging"));
/// ```
pub struct LayeredEnvironment {
    /// Readers, maintained in priority order (highest first)
    readers: Vec<Box<dyn EnvironmentReader>>,
}

impl LayeredEnvironment {
    /// Creates an empty layered environment.
    pub fn new() -> Self {
        Self {
            readers: Vec::new(),
        }
    }

    /// Adds a reader. Readers are re-sorted by priority after each addition.
    pub fn add_reader(&mut self, reader: Box<dyn EnvironmentReader>) {
        self.readers.push(reader);
        // stable: equal priorities keep insertion order
        self.readers
            .sort_by_key(|reader| std::cmp::Reverse(reader.priority()));
    }

    /// Number of readers.
    pub fn len(&self) -> usize {
        self.readers.len()
    }

    /// Whether no reader has been added.
    pub fn is_empty(&self) -> bool {
        self.readers.is_empty()
    }

    /// Names of the readers in query order.
    pub fn reader_names(&self) -> Vec<&str> {
        self.readers.iter().map(|reader| reader.name()).collect()
    }
}

impl Default for LayeredEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvironmentReader for LayeredEnvironment {
    fn name(&self) -> &str {
        "layered"
    }

    fn priority(&self) -> u8 {
        self.readers
            .iter()
            .map(|reader| reader.priority())
            .max()
            .unwrap_or(0)
    }

    fn lookup(&self, key: &ConfigKey) -> Result<Option<String>> {
        for reader in &self.readers {
            match reader.lookup(key) {
                Ok(Some(value)) => return Ok(Some(value)),
                Ok(None) => continue,
                Err(e) => {
                    // Log the error but continue to next reader
                    tracing::warn!(
                        "Error querying reader '{}' for '{}': {}",
                        reader.name(),
                        key,
                        e
                    );
                    continue;
                }
            }
        }
        Ok(None)
    }

    fn all_keys(&self) -> Result<Vec<ConfigKey>> {
        let mut keys = BTreeSet::new();
        for reader in &self.readers {
            match reader.all_keys() {
                Ok(reader_keys) => keys.extend(reader_keys),
                Err(e) => tracing::warn!("Failed to list keys of reader '{}': {}", reader.name(), e),
            }
        }
        Ok(keys.into_iter().collect())
    }
}
