// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer: the resolver and the bootstrap sequence around it.
//!
//! [`ConfigResolver`] turns an environment into a [`ResolvedConfig`];
//! [`Bootstrap`] wires readers, resolver and host together.
//!
//! [`ResolvedConfig`]: crate::domain::ResolvedConfig

pub mod bootstrap;
pub mod layered_env;
pub mod resolver;

pub use bootstrap::{Bootstrap, BootstrapBuilder};
pub use layered_env::LayeredEnvironment;
pub use resolver::{ConfigResolver, DEFAULT_TIER_SUFFIX};
