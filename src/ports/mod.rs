// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! These traits are the seams between the resolver and the outside world:
//! where environment values come from, how constant files are parsed, and who
//! receives the resolved configuration.

pub mod host;
pub mod parser;
pub mod source;

// Re-export commonly used types
pub use host::BootstrapHost;
pub use parser::ConfigParser;
pub use source::EnvironmentReader;
