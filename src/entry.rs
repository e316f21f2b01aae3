// SPDX-License-Identifier: MIT OR Apache-2.0

//! The two bootstrap entry points.
//!
//! Both share one resolver and differ only in the layout they anchor paths
//! to: [`run_public`] serves a single document root, [`run_boot`] sits in a
//! directory next to a separate `public/` root.

use crate::domain::{ConfigError, Layout, Result};
use crate::ports::BootstrapHost;
use crate::service::{Bootstrap, BootstrapBuilder};
use std::path::PathBuf;

/// Options shared by both entry points.
///
/// # Examples
///
/// ```rust
/// use mantle::entry::EntryOptions;
/// use std::path::Path;
///
/// let options = EntryOptions {
///     dir: Some("/srv/site".into()),
///     ..EntryOptions::default()
/// };
/// assert_eq!(options.base_dir().unwrap(), Path::new("/srv/site"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntryOptions {
    /// Install directory. Defaults to the directory of the running executable.
    pub dir: Option<PathBuf>,
    /// `.env` file. Defaults to `{dir}/.env`, read only if present.
    pub env_file: Option<PathBuf>,
    /// Read only process variables with this prefix, stripping it.
    pub env_prefix: Option<String>,
    /// Tier file suffix. Defaults to [`DEFAULT_TIER_SUFFIX`].
    ///
    /// [`DEFAULT_TIER_SUFFIX`]: crate::service::DEFAULT_TIER_SUFFIX
    pub tier_suffix: Option<String>,
    /// Constants defined before resolution, such as an outer `ABSPATH`.
    pub preset: Vec<(String, String)>,
}

impl EntryOptions {
    /// The install directory, always absolute.
    ///
    /// A relative `dir` is resolved against the current working directory.
    pub fn base_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.dir {
            return Ok(std::path::absolute(dir)?);
        }
        let exe = std::env::current_exe()?;
        exe.parent()
            .map(PathBuf::from)
            .ok_or_else(|| ConfigError::SourceError {
                source_name: "entry".to_string(),
                message: format!("Cannot determine install directory from {}", exe.display()),
                source: None,
            })
    }

    fn bootstrap(&self, layout: Layout) -> Result<Bootstrap> {
        let base = layout.base_dir().to_path_buf();
        let mut builder = BootstrapBuilder::new(layout);

        builder = match &self.env_prefix {
            Some(prefix) => builder.with_env_prefix(prefix.clone()),
            None => builder.with_process_env(),
        };
        builder = match &self.env_file {
            Some(path) => builder.with_dotenv_file(path)?,
            None => builder.with_optional_dotenv_file(base.join(".env"))?,
        };
        if let Some(suffix) = &self.tier_suffix {
            builder = builder.tier_suffix(suffix.clone());
        }
        for (key, value) in &self.preset {
            builder = builder.preset(key.as_str(), value.as_str());
        }

        builder.build()
    }
}

/// Bootstraps a single-root install and hands off to `host`.
pub fn run_public(options: &EntryOptions, host: &mut dyn BootstrapHost) -> Result<()> {
    let layout = Layout::single_root(options.base_dir()?);
    tracing::debug!("Public entry, root {}", layout.base_dir().display());
    options.bootstrap(layout)?.run(host)
}

/// Bootstraps a split-public install and hands off to `host`.
pub fn run_boot(options: &EntryOptions, host: &mut dyn BootstrapHost) -> Result<()> {
    let layout = Layout::split_public(options.base_dir()?);
    tracing::debug!(
        "Boot entry, public root {}",
        layout.public_root().display()
    );
    options.bootstrap(layout)?.run(host)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::EnvVarAdapter;
    use crate::domain::key_spec::REQUIRED_KEYS;
    use crate::domain::keys;
    use crate::service::ConfigResolver;
    use std::path::Path;

    #[test]
    fn test_relative_dir_yields_absolute_paths() {
        let options = EntryOptions {
            dir: Some(PathBuf::from("site/boot")),
            ..EntryOptions::default()
        };
        let base = options.base_dir().unwrap();
        assert!(base.is_absolute());
        assert!(base.ends_with("site/boot"));

        let env = EnvVarAdapter::with_values(
            REQUIRED_KEYS
                .iter()
                .map(|key| (key.to_string(), "x".to_string()))
                .collect(),
        );
        let table = ConfigResolver::new(Layout::split_public(base))
            .resolve_core(&env)
            .unwrap();
        for key in [keys::ABSPATH, keys::WP_CONTENT_DIR, keys::MANTLE_PUBLIC_DIR] {
            let value = table.text(key).unwrap();
            assert!(Path::new(value).is_absolute(), "{} = {}", key, value);
        }
        assert!(table.text(keys::ABSPATH).unwrap().ends_with("site/public/wp/"));
    }

    #[test]
    fn test_base_dir_explicit() {
        let options = EntryOptions {
            dir: Some(PathBuf::from("/srv/site/boot")),
            ..EntryOptions::default()
        };
        assert_eq!(options.base_dir().unwrap(), PathBuf::from("/srv/site/boot"));
    }

    #[test]
    fn test_base_dir_defaults_to_executable_dir() {
        let options = EntryOptions::default();
        let exe = std::env::current_exe().unwrap();
        assert_eq!(options.base_dir().unwrap(), exe.parent().unwrap());
    }

    #[test]
    fn test_missing_explicit_env_file() {
        let options = EntryOptions {
            dir: Some(PathBuf::from("/nonexistent/mantle")),
            env_file: Some(PathBuf::from("/nonexistent/mantle/.env")),
            ..EntryOptions::default()
        };
        assert!(options.bootstrap(Layout::single_root("/nonexistent/mantle")).is_err());
    }
}
