// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core types and rules.
//!
//! This module holds the constant names, values and requirement classes, the
//! define-once namespace and the deployment layouts. It has no knowledge of
//! where environment values come from or who consumes the result.

pub mod config_key;
pub mod config_value;
pub mod constants;
pub mod errors;
pub mod key_spec;
pub mod layout;

// Re-export commonly used types
pub use config_key::{keys, ConfigKey};
pub use config_value::ConfigValue;
pub use constants::{ConstantTable, ResolvedConfig};
pub use errors::{ConfigError, Result};
pub use key_spec::{DefaultRule, FallbackPolicy, KeySpec, Requirement, ValueKind};
pub use layout::Layout;
