// SPDX-License-Identifier: MIT OR Apache-2.0

//! The bootstrap configuration resolver.
//!
//! Resolution runs in a fixed order, because later steps read what earlier
//! steps defined:
//!
//! 1. required keys, failing on the first absent one
//! 2. optional keys, falling back to defaults
//! 3. fixed constants
//! 4. derived paths and URLs
//! 5. `ABSPATH`, unless preset
//! 6. the environment-tier file named by `WP_ENV`
//!
//! Every step goes through a [`ConstantTable`], so the first definition of a
//! name wins. Presets are defined before step 1.

use crate::adapters::TierFileLoader;
use crate::domain::key_spec::{bootstrap_keys, fixed_constants};
use crate::domain::layout::path_string;
use crate::domain::{
    keys, ConfigError, ConfigKey, ConfigValue, ConstantTable, Layout, Requirement,
    ResolvedConfig, Result, ValueKind,
};
use crate::ports::EnvironmentReader;
use std::path::PathBuf;

/// Tier file suffix used when none is configured.
#[cfg(feature = "yaml")]
pub const DEFAULT_TIER_SUFFIX: &str = "-env.yaml";

/// Tier file suffix used when none is configured.
#[cfg(not(feature = "yaml"))]
pub const DEFAULT_TIER_SUFFIX: &str = "-env.env";

/// Resolves the bootstrap constants for one deployment layout.
///
/// # Examples
///
/// ```rust
/// use mantle::adapters::EnvVarAdapter;
/// use mantle::domain::Layout;
/// use mantle::service::ConfigResolver;
/// use std::collections::HashMap;
///
/// let resolver = ConfigResolver::new(Layout::single_root("/srv/site"));
/// let env = EnvVarAdapter::with_values(HashMap::new());
///
/// let err = resolver.resolve_core(&env).unwrap_err();
/// assert_eq!(err.to_string(), "Missing env var: WP_HOME");
/// ```
#[derive(Debug)]
pub struct ConfigResolver {
    layout: Layout,
    tier_suffix: String,
    loader: TierFileLoader,
    preset: Vec<(ConfigKey, ConfigValue)>,
}

impl ConfigResolver {
    /// Creates a resolver for `layout` with the default tier suffix and loader.
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            tier_suffix: DEFAULT_TIER_SUFFIX.to_string(),
            loader: TierFileLoader::default(),
            preset: Vec::new(),
        }
    }

    /// Sets the suffix appended to `WP_ENV` to name the tier file.
    pub fn with_tier_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.tier_suffix = suffix.into();
        self
    }

    /// Replaces the tier file loader.
    pub fn with_tier_loader(mut self, loader: TierFileLoader) -> Self {
        self.loader = loader;
        self
    }

    /// Defines a constant before resolution starts, as an outer caller would.
    ///
    /// A preset wins over anything the resolver would define under that name.
    pub fn with_preset(mut self, key: impl Into<ConfigKey>, value: impl Into<ConfigValue>) -> Self {
        self.preset.push((key.into(), value.into()));
        self
    }

    /// The layout this resolver anchors paths to.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Runs every step except the tier file.
    ///
    /// Fails with [`ConfigError::MissingEnvVar`] on the first absent required
    /// key; nothing after it is looked up.
    pub fn resolve_core(&self, env: &dyn EnvironmentReader) -> Result<ConstantTable> {
        let mut table = ConstantTable::new();
        for (key, value) in &self.preset {
            table.define_if_undefined(key.clone(), value.clone());
        }

        for spec in bootstrap_keys() {
            let found = env.lookup(&spec.key)?;
            let value = match spec.requirement {
                Requirement::Required => match found {
                    Some(raw) => ConfigValue::Text(raw),
                    None => {
                        return Err(ConfigError::MissingEnvVar {
                            key: spec.key.into_string(),
                        })
                    }
                },
                Requirement::Optional {
                    default,
                    fallback,
                    kind,
                } => match fallback.apply(found) {
                    Some(raw) => match kind {
                        ValueKind::Text => ConfigValue::Text(raw),
                        ValueKind::Flag => ConfigValue::parse_flag(&raw),
                    },
                    None => {
                        tracing::debug!("Using default for {}", spec.key);
                        default.value(&table)
                    }
                },
            };
            define(&mut table, spec.key, value);
        }

        for (key, value) in fixed_constants() {
            define(&mut table, key, value);
        }

        let public_root = path_string(&self.layout.public_root());
        if self.layout.exports_public_dir() {
            define(&mut table, keys::MANTLE_PUBLIC_DIR, public_root.clone());
        }
        let content_dir = table.text(keys::CONTENT_DIR).unwrap_or_default().to_string();
        let content_url = format!(
            "{}{}",
            table.text(keys::WP_HOME).unwrap_or_default(),
            content_dir
        );
        define(&mut table, keys::WP_CONTENT_URL, content_url);
        define(
            &mut table,
            keys::WP_CONTENT_DIR,
            format!("{}{}", public_root, content_dir),
        );

        if !table.define_if_undefined(keys::ABSPATH, format!("{}/wp/", public_root)) {
            tracing::debug!("ABSPATH preset by caller, keeping it");
        }

        tracing::debug!("Resolved {} core constants", table.len());
        Ok(table)
    }

    /// Path of the tier file selected by the resolved `WP_ENV`.
    pub fn tier_file_path(&self, table: &ConstantTable) -> Result<PathBuf> {
        let tier = table
            .text(keys::WP_ENV)
            .ok_or_else(|| ConfigError::InvalidTierName {
                tier: table
                    .get(keys::WP_ENV)
                    .map(ToString::to_string)
                    .unwrap_or_default(),
                reason: "is not a text value",
            })?;
        self.layout.tier_file(tier, &self.tier_suffix)
    }

    /// Loads the tier file into `table`, returning its path.
    ///
    /// Entries naming an already-defined constant are skipped.
    pub fn apply_tier_file(&self, table: &mut ConstantTable) -> Result<PathBuf> {
        let path = self.tier_file_path(table)?;
        let entries = self.loader.load(&path)?;
        let count = entries.len();
        for (key, value) in entries {
            define(table, key, value);
        }
        tracing::info!("Loaded {} constants from {}", count, path.display());
        Ok(path)
    }

    /// Runs the full resolution and freezes the result.
    pub fn resolve(&self, env: &dyn EnvironmentReader) -> Result<ResolvedConfig> {
        let mut table = self.resolve_core(env)?;
        self.apply_tier_file(&mut table)?;
        Ok(table.freeze())
    }
}

// First writer wins; a losing write is reported, never fatal.
fn define(table: &mut ConstantTable, key: impl Into<ConfigKey>, value: impl Into<ConfigValue>) {
    let key = key.into();
    if table.is_defined(key.as_str()) {
        tracing::warn!("Constant {} already defined, keeping the first value", key);
        return;
    }
    table.define_if_undefined(key, value);
}
