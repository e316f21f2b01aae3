// SPDX-License-Identifier: MIT OR Apache-2.0

//! Constant names used by the bootstrap sequence.
//!
//! [`ConfigKey`] is a newtype over `String` so tier files can introduce
//! arbitrary constants, while [`keys`] lists every name the resolver itself
//! reads or defines.

use std::borrow::Borrow;
use std::fmt;

/// Names of the constants known to the resolver.
pub mod keys {
    /// Public URL of the site.
    pub const WP_HOME: &str = "WP_HOME";
    /// Database name.
    pub const DB_NAME: &str = "DB_NAME";
    /// Database user.
    pub const DB_USER: &str = "DB_USER";
    /// Database password.
    pub const DB_PASSWORD: &str = "DB_PASSWORD";
    /// Database host.
    pub const DB_HOST: &str = "DB_HOST";
    /// Authentication key.
    pub const AUTH_KEY: &str = "AUTH_KEY";
    /// Authentication salt.
    pub const AUTH_SALT: &str = "AUTH_SALT";
    /// Secure authentication key.
    pub const SECURE_AUTH_KEY: &str = "SECURE_AUTH_KEY";
    /// Secure authentication salt.
    pub const SECURE_AUTH_SALT: &str = "SECURE_AUTH_SALT";
    /// Logged-in cookie key.
    pub const LOGGED_IN_KEY: &str = "LOGGED_IN_KEY";
    /// Logged-in cookie salt.
    pub const LOGGED_IN_SALT: &str = "LOGGED_IN_SALT";
    /// Nonce key.
    pub const NONCE_KEY: &str = "NONCE_KEY";
    /// Nonce salt.
    pub const NONCE_SALT: &str = "NONCE_SALT";

    /// Environment tier name; selects the tier override file.
    pub const WP_ENV: &str = "WP_ENV";
    /// URL of the WordPress core install.
    pub const WP_SITE_URL: &str = "WP_SITE_URL";
    /// Database table prefix.
    pub const DB_PREFIX: &str = "DB_PREFIX";
    /// Disables the request-triggered cron runner.
    pub const DISABLE_WP_CRON: &str = "DISABLE_WP_CRON";

    /// Disables automatic core updates.
    pub const AUTOMATIC_UPDATER_DISABLED: &str = "AUTOMATIC_UPDATER_DISABLED";
    /// Disables the admin file editor.
    pub const DISALLOW_FILE_EDIT: &str = "DISALLOW_FILE_EDIT";
    /// Database collation.
    pub const DB_COLLATE: &str = "DB_COLLATE";
    /// Database character set.
    pub const DB_CHARSET: &str = "DB_CHARSET";
    /// Content directory, relative to the public root and the home URL.
    pub const CONTENT_DIR: &str = "CONTENT_DIR";

    /// Public document root (split-public layout only).
    pub const MANTLE_PUBLIC_DIR: &str = "MANTLE_PUBLIC_DIR";
    /// Public URL of the content directory.
    pub const WP_CONTENT_URL: &str = "WP_CONTENT_URL";
    /// Filesystem path of the content directory.
    pub const WP_CONTENT_DIR: &str = "WP_CONTENT_DIR";
    /// Filesystem path of the WordPress core install, with a trailing slash.
    pub const ABSPATH: &str = "ABSPATH";
}

/// A type-safe wrapper for constant names.
///
/// # Examples
///
/// ```
/// use mantle::domain::config_key::{keys, ConfigKey};
///
/// let key = ConfigKey::from(keys::WP_HOME);
/// assert_eq!(key.as_str(), "WP_HOME");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConfigKey(String);

impl ConfigKey {
    /// Creates a new `ConfigKey` from a `String`.
    pub fn new(key: String) -> Self {
        ConfigKey(key)
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts the `ConfigKey` into its inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for ConfigKey {
    fn from(s: String) -> Self {
        ConfigKey(s)
    }
}

impl From<&str> for ConfigKey {
    fn from(s: &str) -> Self {
        ConfigKey(s.to_string())
    }
}

impl From<ConfigKey> for String {
    fn from(key: ConfigKey) -> Self {
        key.0
    }
}

impl AsRef<str> for ConfigKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ConfigKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_config_key_from_str() {
        let key = ConfigKey::from(keys::DB_NAME);
        assert_eq!(key.as_str(), "DB_NAME");
    }

    #[test]
    fn test_config_key_into_string() {
        let key = ConfigKey::from("WP_DEBUG");
        let s: String = key.into();
        assert_eq!(s, "WP_DEBUG");
    }

    #[test]
    fn test_config_key_display() {
        let key = ConfigKey::from(keys::ABSPATH);
        assert_eq!(format!("{}", key), "ABSPATH");
    }

    #[test]
    fn test_config_key_borrow_lookup() {
        let mut map = HashMap::new();
        map.insert(ConfigKey::from(keys::WP_ENV), "staging");

        assert_eq!(map.get("WP_ENV"), Some(&"staging"));
        assert_eq!(map.get("WP_HOME"), None);
    }

    #[test]
    fn test_config_key_ordering() {
        let mut keys = vec![ConfigKey::from("DB_USER"), ConfigKey::from("AUTH_KEY")];
        keys.sort();
        assert_eq!(keys[0].as_str(), "AUTH_KEY");
    }
}
