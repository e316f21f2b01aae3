// SPDX-License-Identifier: MIT OR Apache-2.0

//! Which environment variables the resolver reads, and what happens when one
//! is missing.
//!
//! Each key carries a [`Requirement`]. Required keys must be present. Optional
//! keys have a [`DefaultRule`] and a [`FallbackPolicy`] that decides whether an
//! empty value counts as missing.

use crate::domain::config_key::keys;
use crate::domain::{ConfigKey, ConfigValue, ConstantTable};

/// Required keys, in resolution order.
pub const REQUIRED_KEYS: [&str; 13] = [
    keys::WP_HOME,
    keys::DB_NAME,
    keys::DB_USER,
    keys::DB_PASSWORD,
    keys::DB_HOST,
    keys::AUTH_KEY,
    keys::AUTH_SALT,
    keys::SECURE_AUTH_KEY,
    keys::SECURE_AUTH_SALT,
    keys::LOGGED_IN_KEY,
    keys::LOGGED_IN_SALT,
    keys::NONCE_KEY,
    keys::NONCE_SALT,
];

/// Decides whether a looked-up value is used or replaced by the default.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Absent and present-but-empty both fall back to the default.
    ///
    /// An explicitly set `WP_ENV=""` therefore resolves to `production`.
    EmptyAsAbsent,
    /// Only absence falls back; an empty value is kept.
    KeepEmpty,
}

impl FallbackPolicy {
    /// Applies the policy to a looked-up value. `None` means "use the default".
    ///
    /// # Examples
    ///
    /// ```
    /// use mantle::domain::key_spec::FallbackPolicy;
    ///
    /// assert_eq!(FallbackPolicy::EmptyAsAbsent.apply(Some(String::new())), None);
    /// assert_eq!(FallbackPolicy::KeepEmpty.apply(Some(String::new())), Some(String::new()));
    /// ```
    pub fn apply(self, found: Option<String>) -> Option<String> {
        match self {
            FallbackPolicy::EmptyAsAbsent => found.filter(|value| !value.is_empty()),
            FallbackPolicy::KeepEmpty => found,
        }
    }
}

/// How raw environment text becomes a [`ConfigValue`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    /// Kept verbatim.
    Text,
    /// Read with [`ConfigValue::parse_flag`]; unrecognised spellings stay text.
    Flag,
}

/// The value an optional key takes when the environment doesn't provide one.
#[derive(Clone, Debug)]
pub enum DefaultRule {
    /// A fixed value.
    Literal(ConfigValue),
    /// Computed from constants that are already defined.
    Derived(fn(&ConstantTable) -> ConfigValue),
}

impl DefaultRule {
    /// Produces the default value.
    pub fn value(&self, table: &ConstantTable) -> ConfigValue {
        match self {
            DefaultRule::Literal(value) => value.clone(),
            DefaultRule::Derived(compute) => compute(table),
        }
    }
}

/// Whether a key must be present.
#[derive(Clone, Debug)]
pub enum Requirement {
    /// Absence is fatal.
    Required,
    /// Absence falls back to a default.
    Optional {
        /// The default
        default: DefaultRule,
        /// When the default applies
        fallback: FallbackPolicy,
        /// How the raw value is interpreted
        kind: ValueKind,
    },
}

/// An environment variable the resolver reads.
#[derive(Clone, Debug)]
pub struct KeySpec {
    /// The variable, which is also the constant name
    pub key: ConfigKey,
    /// Its requirement class
    pub requirement: Requirement,
}

impl KeySpec {
    /// A required key.
    pub fn required(key: &str) -> Self {
        Self {
            key: ConfigKey::from(key),
            requirement: Requirement::Required,
        }
    }

    /// An optional key with the empty-as-absent fallback.
    pub fn optional(key: &str, default: DefaultRule, kind: ValueKind) -> Self {
        Self {
            key: ConfigKey::from(key),
            requirement: Requirement::Optional {
                default,
                fallback: FallbackPolicy::EmptyAsAbsent,
                kind,
            },
        }
    }

    /// Whether this key is required.
    pub fn is_required(&self) -> bool {
        matches!(self.requirement, Requirement::Required)
    }
}

fn site_url_default(table: &ConstantTable) -> ConfigValue {
    let home = table.text(keys::WP_HOME).unwrap_or_default();
    ConfigValue::Text(format!("{}/wp", home))
}

/// Every key the resolver reads from the environment, in resolution order.
///
/// Required keys come first; optional defaults may read them.
pub fn bootstrap_keys() -> Vec<KeySpec> {
    let mut specs: Vec<KeySpec> = REQUIRED_KEYS.iter().map(|key| KeySpec::required(key)).collect();
    specs.extend([
        KeySpec::optional(
            keys::WP_ENV,
            DefaultRule::Literal(ConfigValue::from("production")),
            ValueKind::Text,
        ),
        KeySpec::optional(
            keys::WP_SITE_URL,
            DefaultRule::Derived(site_url_default),
            ValueKind::Text,
        ),
        KeySpec::optional(
            keys::DB_PREFIX,
            DefaultRule::Literal(ConfigValue::from("wp_")),
            ValueKind::Text,
        ),
        KeySpec::optional(
            keys::DISABLE_WP_CRON,
            DefaultRule::Literal(ConfigValue::Flag(false)),
            ValueKind::Flag,
        ),
    ]);
    specs
}

/// Constants whose values never come from the environment.
pub fn fixed_constants() -> Vec<(&'static str, ConfigValue)> {
    vec![
        (keys::AUTOMATIC_UPDATER_DISABLED, ConfigValue::Flag(true)),
        (keys::DISALLOW_FILE_EDIT, ConfigValue::Flag(true)),
        (keys::DB_COLLATE, ConfigValue::from("")),
        (keys::DB_CHARSET, ConfigValue::from("utf8mb4")),
        (keys::CONTENT_DIR, ConfigValue::from("/ext")),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_keys_come_first() {
        let specs = bootstrap_keys();
        assert_eq!(specs.len(), 17);
        assert!(specs[..13].iter().all(KeySpec::is_required));
        assert!(specs[13..].iter().all(|spec| !spec.is_required()));
        assert_eq!(specs[0].key.as_str(), keys::WP_HOME);
        assert_eq!(specs[13].key.as_str(), keys::WP_ENV);
    }

    #[test]
    fn test_site_url_default_reads_home() {
        let mut table = ConstantTable::new();
        table.define(keys::WP_HOME, "https://example.com").unwrap();

        let rule = DefaultRule::Derived(site_url_default);
        assert_eq!(rule.value(&table), ConfigValue::from("https://example.com/wp"));
    }

    #[test]
    fn test_literal_default() {
        let rule = DefaultRule::Literal(ConfigValue::from("wp_"));
        assert_eq!(rule.value(&ConstantTable::new()), ConfigValue::from("wp_"));
    }

    #[test]
    fn test_fallback_policy() {
        let policy = FallbackPolicy::EmptyAsAbsent;
        assert_eq!(policy.apply(None), None);
        assert_eq!(policy.apply(Some(String::new())), None);
        assert_eq!(policy.apply(Some("0".to_string())), Some("0".to_string()));

        assert_eq!(FallbackPolicy::KeepEmpty.apply(None), None);
    }

    #[test]
    fn test_fixed_constants() {
        let fixed = fixed_constants();
        assert_eq!(fixed.len(), 5);
        assert!(fixed
            .iter()
            .any(|(key, value)| *key == keys::CONTENT_DIR && value.as_str() == Some("/ext")));
    }
}
