// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process environment reader adapter.
//!
//! This module provides an adapter that reads variables from the process
//! environment.

use crate::domain::{ConfigKey, Result};
use crate::ports::EnvironmentReader;
use std::collections::HashMap;
use std::env;
use std::sync::{PoisonError, RwLock};

/// Maximum length for environment variable keys (prevents DoS)
const MAX_ENV_KEY_LEN: usize = 512;

/// Maximum length for environment variable values (prevents DoS)
const MAX_ENV_VALUE_LEN: usize = 1048576; // 1MB

/// Environment reader for the process environment.
///
/// Names are matched exactly; an optional prefix can namespace them, so with
/// prefix `SITE_` the variable `SITE_DB_NAME` is read as `DB_NAME`.
///
/// # Priority
///
/// The process environment has a priority of 2, which means it overrides
/// `.env` files (priority 1).
///
/// # Examples
///
/// ```rust
/// use mantle::adapters::EnvVarAdapter;
/// use mantle::ports::EnvironmentReader;
/// use std::collections::HashMap;
///
/// let adapter = EnvVarAdapter::new();
/// assert_eq!(adapter.name(), "env");
///
/// let mut values = HashMap::new();
/// values.insert("WP_HOME".to_string(), "https://example.com".to_string());
/// let adapter = EnvVarAdapter::with_values(values);
/// assert_eq!(
///     adapter.lookup_str("WP_HOME").unwrap().as_deref(),
///     Some("https://example.com")
/// );
/// ```
#[derive(Debug)]
pub struct EnvVarAdapter {
    /// Optional prefix to filter and strip
    prefix: Option<String>,
    /// Cached variables, loaded lazily on first lookup
    cache: RwLock<Option<HashMap<String, String>>>,
}

impl EnvVarAdapter {
    /// Creates a reader over the whole process environment.
    pub fn new() -> Self {
        Self {
            prefix: None,
            cache: RwLock::new(None),
        }
    }

    /// Creates a reader over variables starting with `prefix`, with the prefix stripped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mantle::adapters::EnvVarAdapter;
    ///
    /// let adapter = EnvVarAdapter::with_prefix("SITE_");
    /// ```
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            cache: RwLock::new(None),
        }
    }

    /// Creates a reader over a fixed set of variables.
    ///
    /// The process environment is never consulted. This is how tests and
    /// embedding callers feed the resolver.
    pub fn with_values(values: HashMap<String, String>) -> Self {
        Self {
            prefix: None,
            cache: RwLock::new(Some(values)),
        }
    }

    /// Loads the process environment into a new HashMap.
    fn load(&self) -> HashMap<String, String> {
        let mut cache = HashMap::new();

        // vars_os: a non-UTF-8 variable must not abort the whole scan
        for (key, value) in env::vars_os() {
            let (Ok(key), Ok(value)) = (key.into_string(), value.into_string()) else {
                tracing::debug!("Skipping environment variable that is not valid UTF-8");
                continue;
            };

            if key.len() > MAX_ENV_KEY_LEN || value.len() > MAX_ENV_VALUE_LEN {
                tracing::debug!(
                    "Skipping oversized environment variable: key_len={}, value_len={} (max key={}, max value={})",
                    key.len(),
                    value.len(),
                    MAX_ENV_KEY_LEN,
                    MAX_ENV_VALUE_LEN
                );
                continue;
            }

            let key = match &self.prefix {
                Some(prefix) => match key.strip_prefix(prefix.as_str()) {
                    Some(stripped) => stripped.to_string(),
                    None => continue,
                },
                None => key,
            };

            cache.insert(key, value);
        }

        tracing::debug!(
            "Loaded {} environment variables (prefix={:?})",
            cache.len(),
            self.prefix
        );

        cache
    }

    /// Runs `f` against the cache, loading it first if necessary.
    fn with_cache<T>(&self, f: impl FnOnce(&HashMap<String, String>) -> T) -> T {
        {
            let guard = self.cache.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(cache) = guard.as_ref() {
                return f(cache);
            }
        }

        let mut guard = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        let cache = guard.get_or_insert_with(|| self.load());
        f(cache)
    }
}

impl Default for EnvVarAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvironmentReader for EnvVarAdapter {
    fn name(&self) -> &str {
        "env"
    }

    fn priority(&self) -> u8 {
        2
    }

    fn lookup(&self, key: &ConfigKey) -> Result<Option<String>> {
        Ok(self.with_cache(|cache| cache.get(key.as_str()).cloned()))
    }

    fn all_keys(&self) -> Result<Vec<ConfigKey>> {
        Ok(self.with_cache(|cache| cache.keys().map(|k| ConfigKey::from(k.as_str())).collect()))
    }
}
