// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bootstrap host trait definition.
//!
//! A bootstrap host is whatever takes over once configuration is resolved:
//! the platform's settings loader, or an outer process that consumes the
//! configuration itself.

use crate::domain::{ResolvedConfig, Result};

/// The consumer of a resolved configuration.
///
/// `hand_off` is the last thing the bootstrap sequence does. A host that
/// replaces the process never returns from it on success; a host that only
/// publishes the configuration returns `Ok(())` and the caller exits.
///
/// # Examples
///
/// ```rust
/// use mantle::ports::BootstrapHost;
/// use mantle::domain::{ResolvedConfig, Result};
///
/// #[derive(Default)]
/// struct Keep(Option<ResolvedConfig>);
///
/// impl BootstrapHost for Keep {
///     fn name(&self) -> &str {
///         "keep"
///     }
///
///     fn hand_off(&mut self, config: ResolvedConfig) -> Result<()> {
///         self.0 = Some(config);
///         Ok(())
///     }
/// }
/// ```
pub trait BootstrapHost {
    /// Returns the name of this host, used in logs and errors.
    fn name(&self) -> &str;

    /// Hands the configuration over.
    fn hand_off(&mut self, config: ResolvedConfig) -> Result<()>;
}
