// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deployment layouts and tier file naming.
//!
//! Two layouts are supported. In a single-root layout the bootstrap directory
//! is itself the public document root. In a split-public layout the bootstrap
//! directory sits next to a `public` directory that is the document root.
//! Both look for the tier file in the bootstrap directory.

use crate::domain::{ConfigError, Result};
use std::path::{Path, PathBuf};

/// Where the public document root lives relative to the bootstrap directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Layout {
    /// The bootstrap directory is the public root.
    SingleRoot {
        /// Bootstrap directory
        dir: PathBuf,
    },
    /// The public root is `public/` next to the bootstrap directory.
    SplitPublic {
        /// Bootstrap directory
        dir: PathBuf,
    },
}

impl Layout {
    /// A single-root layout anchored at `dir`.
    pub fn single_root(dir: impl AsRef<Path>) -> Self {
        Layout::SingleRoot {
            dir: normalize(dir.as_ref()),
        }
    }

    /// A split-public layout anchored at `dir`.
    pub fn split_public(dir: impl AsRef<Path>) -> Self {
        Layout::SplitPublic {
            dir: normalize(dir.as_ref()),
        }
    }

    /// The bootstrap directory.
    pub fn base_dir(&self) -> &Path {
        match self {
            Layout::SingleRoot { dir } | Layout::SplitPublic { dir } => dir,
        }
    }

    /// The public document root.
    ///
    /// # Examples
    ///
    /// ```
    /// use mantle::domain::Layout;
    /// use std::path::Path;
    ///
    /// assert_eq!(Layout::single_root("/srv/site").public_root(), Path::new("/srv/site"));
    /// assert_eq!(Layout::split_public("/srv/site/boot").public_root(), Path::new("/srv/site/public"));
    /// ```
    pub fn public_root(&self) -> PathBuf {
        match self {
            Layout::SingleRoot { dir } => dir.clone(),
            Layout::SplitPublic { dir } => dir.parent().unwrap_or(dir).join("public"),
        }
    }

    /// Whether this layout also exports the public root as `MANTLE_PUBLIC_DIR`.
    pub fn exports_public_dir(&self) -> bool {
        matches!(self, Layout::SplitPublic { .. })
    }

    /// Path of the tier file for `tier`: `{base_dir}/{tier}{suffix}`.
    pub fn tier_file(&self, tier: &str, suffix: &str) -> Result<PathBuf> {
        validate_tier_name(tier)?;
        Ok(self.base_dir().join(format!("{}{}", tier, suffix)))
    }
}

/// Renders a path the way constants carry it.
pub fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

// Drops trailing separators and `.` components so concatenated constants
// never contain `//`.
fn normalize(path: &Path) -> PathBuf {
    path.components().collect()
}

fn validate_tier_name(tier: &str) -> Result<()> {
    let reason = if tier.is_empty() {
        Some("is empty")
    } else if tier == "." || tier == ".." {
        Some("is a relative directory")
    } else if tier.contains('/') || tier.contains('\\') {
        Some("contains a path separator")
    } else if !tier
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
    {
        Some("contains characters outside [A-Za-z0-9_.-]")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ConfigError::InvalidTierName {
            tier: tier.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}
