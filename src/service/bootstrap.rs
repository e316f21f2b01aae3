// SPDX-License-Identifier: MIT OR Apache-2.0

//! The bootstrap sequence: layered environment, resolver and host hand-off.

use crate::adapters::{DotenvFileAdapter, EnvVarAdapter, TierFileLoader};
use crate::domain::{ConfigKey, ConfigValue, Layout, ResolvedConfig, Result};
use crate::ports::{BootstrapHost, EnvironmentReader};
use crate::service::{ConfigResolver, LayeredEnvironment};
use std::path::Path;

/// One configured bootstrap run.
///
/// Use [`Bootstrap::builder`] to create one.
///
/// # Examples
///
/// ```rust,no_run
/// use mantle::adapters::{EmitHost, OutputFormat};
/// use mantle::domain::Layout;
/// use mantle::service::Bootstrap;
///
/// # fn main() -> mantle::domain::Result<()> {
/// let bootstrap = Bootstrap::builder(Layout::split_public("/srv/site/boot"))
///     .with_process_env()
///     .with_optional_dotenv_file("/srv/site/boot/.env")?
///     .build()?;
///
/// bootstrap.run(&mut EmitHost::stdout(OutputFormat::Env))?;
/// # Ok(())
/// # }
/// ```
pub struct Bootstrap {
    env: LayeredEnvironment,
    resolver: ConfigResolver,
}

impl Bootstrap {
    /// Creates a builder for the given layout.
    pub fn builder(layout: Layout) -> BootstrapBuilder {
        BootstrapBuilder::new(layout)
    }

    /// The layered environment the resolver reads from.
    pub fn environment(&self) -> &LayeredEnvironment {
        &self.env
    }

    /// The resolver.
    pub fn resolver(&self) -> &ConfigResolver {
        &self.resolver
    }

    /// Resolves the configuration without handing it off.
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        tracing::debug!(
            "Resolving with readers {:?}",
            self.env.reader_names()
        );
        self.resolver.resolve(&self.env)
    }

    /// Resolves the configuration and hands it to `host`.
    ///
    /// Nothing reaches the host when resolution fails.
    pub fn run(&self, host: &mut dyn BootstrapHost) -> Result<()> {
        let config = self.resolve()?;
        tracing::debug!("Handing off to host '{}'", host.name());
        host.hand_off(config)
    }
}

/// Builder for [`Bootstrap`].
///
/// Readers keep their own priorities, so the process environment wins over a
/// `.env` file regardless of the order they are added in.
pub struct BootstrapBuilder {
    readers: Vec<Box<dyn EnvironmentReader>>,
    resolver: ConfigResolver,
}

impl BootstrapBuilder {
    /// Creates a builder with no readers.
    pub fn new(layout: Layout) -> Self {
        Self {
            readers: Vec::new(),
            resolver: ConfigResolver::new(layout),
        }
    }

    /// Adds an environment reader.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mantle::adapters::EnvVarAdapter;
    /// use mantle::domain::Layout;
    /// use mantle::service::Bootstrap;
    /// use std::collections::HashMap;
    ///
    /// # fn main() -> mantle::domain::Result<()> {
    /// let bootstrap = Bootstrap::builder(Layout::single_root("/srv/site"))
    ///     .with_reader(Box::new(EnvVarAdapter::with_values(HashMap::new())))
    ///     .build()?;
    /// assert_eq!(bootstrap.environment().len(), 1);
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_reader(mut self, reader: Box<dyn EnvironmentReader>) -> Self {
        self.readers.push(reader);
        self
    }

    /// Adds the process environment.
    pub fn with_process_env(self) -> Self {
        self.with_reader(Box::new(EnvVarAdapter::new()))
    }

    /// Adds the process environment, reading only variables that start with
    /// `prefix` and stripping it.
    pub fn with_env_prefix(self, prefix: impl Into<String>) -> Self {
        self.with_reader(Box::new(EnvVarAdapter::with_prefix(prefix)))
    }

    /// Adds a `.env` file. Fails if it cannot be read or parsed.
    pub fn with_dotenv_file(self, path: impl AsRef<Path>) -> Result<Self> {
        let adapter = DotenvFileAdapter::from_file(path)?;
        Ok(self.with_reader(Box::new(adapter)))
    }

    /// Adds a `.env` file if it exists.
    pub fn with_optional_dotenv_file(self, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.is_file() {
            self.with_dotenv_file(path)
        } else {
            tracing::debug!("No .env file at {}", path.display());
            Ok(self)
        }
    }

    /// Sets the tier file suffix.
    pub fn tier_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.resolver = self.resolver.with_tier_suffix(suffix);
        self
    }

    /// Replaces the tier file loader.
    pub fn tier_loader(mut self, loader: TierFileLoader) -> Self {
        self.resolver = self.resolver.with_tier_loader(loader);
        self
    }

    /// Defines a constant before resolution, as an outer caller would.
    pub fn preset(mut self, key: impl Into<ConfigKey>, value: impl Into<ConfigValue>) -> Self {
        self.resolver = self.resolver.with_preset(key, value);
        self
    }

    /// Builds the bootstrap.
    pub fn build(self) -> Result<Bootstrap> {
        let mut env = LayeredEnvironment::new();
        for reader in self.readers {
            env.add_reader(reader);
        }

        Ok(Bootstrap {
            env,
            resolver: self.resolver,
        })
    }
}
