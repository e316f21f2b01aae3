// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bootstrap configuration resolution for WordPress installs.
//!
//! At process start the resolver reads required and optional variables from
//! the environment, adds fixed and derived constants, loads the override
//! file of the current environment tier and hands the frozen result to a
//! bootstrap host, such as the platform's settings loader.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: constant names and values, the define-once table,
//!   key requirements, layouts and errors
//! - **Ports**: `EnvironmentReader`, `ConfigParser`, `BootstrapHost`
//! - **Adapters**: process environment, `.env` files, YAML tier files, hosts
//! - **Service**: the resolver and the bootstrap sequence around it
//!
//! # Feature Flags
//!
//! - `yaml`: YAML tier files and YAML output (default)
//! - `cli`: the `mantle` binary (default)
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use mantle::prelude::*;
//!
//! # fn main() -> mantle::domain::Result<()> {
//! let bootstrap = Bootstrap::builder(Layout::single_root("/srv/site"))
//!     .with_process_env()
//!     .with_optional_dotenv_file("/srv/site/.env")?
//!     .build()?;
//!
//! let config = bootstrap.resolve()?;
//! println!("{:?}", config.text("WP_CONTENT_URL"));
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod entry;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::adapters::{DotenvFileAdapter, EmitHost, EnvVarAdapter, ExecHost, OutputFormat};
    pub use crate::domain::{
        keys, ConfigError, ConfigKey, ConfigValue, Layout, ResolvedConfig, Result,
    };
    pub use crate::entry::{run_boot, run_public, EntryOptions};
    pub use crate::ports::{BootstrapHost, ConfigParser, EnvironmentReader};
    pub use crate::service::{Bootstrap, ConfigResolver};

    #[cfg(feature = "yaml")]
    pub use crate::adapters::YamlParser;
}
