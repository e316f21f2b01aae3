// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment reader trait definition.
//!
//! This module defines the `EnvironmentReader` trait, the port through which
//! the resolver reads environment variables. The process environment and
//! `.env` files are both readers.

use crate::domain::{ConfigKey, Result};

/// A trait for environment variable sources.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`.
///
/// # Priority
///
/// When several readers are layered, higher priority values are consulted
/// first:
///
/// - **2**: The process environment
/// - **1**: `.env` files
///
/// # Examples
///
/// ```rust
/// use mantle::ports::EnvironmentReader;
/// use mantle::domain::{ConfigKey, Result};
///
/// struct Fixed;
///
/// impl EnvironmentReader for Fixed {
///     fn name(&self) -> &str {
///         "fixed"
///     }
///
///     fn priority(&self) -> u8 {
///         1
///     }
///
///     fn lookup(&self, key: &ConfigKey) -> Result<Option<String>> {
///         Ok((key.as_str() == "WP_ENV").then(|| "staging".to_string()))
///     }
///
///     fn all_keys(&self) -> Result<Vec<ConfigKey>> {
///         Ok(vec![ConfigKey::from("WP_ENV")])
///     }
/// }
///
/// let reader = Fixed;
/// assert_eq!(reader.lookup_str("WP_ENV").unwrap().as_deref(), Some("staging"));
/// ```
pub trait EnvironmentReader: Send + Sync {
    /// Returns the name of this reader, used in logs and errors.
    fn name(&self) -> &str;

    /// Returns the priority of this reader. Higher wins.
    fn priority(&self) -> u8;

    /// Looks up a variable.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(value))` - The variable is set (possibly to the empty string)
    /// * `Ok(None)` - The variable is not set
    /// * `Err(ConfigError)` - The reader failed
    fn lookup(&self, key: &ConfigKey) -> Result<Option<String>>;

    /// Returns every variable name this reader holds.
    fn all_keys(&self) -> Result<Vec<ConfigKey>>;

    /// Convenience method to look up a variable by string name.
    fn lookup_str(&self, key: &str) -> Result<Option<String>> {
        self.lookup(&ConfigKey::from(key))
    }
}
