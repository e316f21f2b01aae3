// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared fixtures for the integration tests.

use mantle::adapters::EnvVarAdapter;
use mantle::domain::key_spec::REQUIRED_KEYS;
use mantle::domain::{keys, ResolvedConfig, Result};
use mantle::ports::BootstrapHost;
use std::collections::HashMap;

/// A host that keeps what it receives.
#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingHost {
    pub received: Vec<ResolvedConfig>,
}

impl BootstrapHost for RecordingHost {
    fn name(&self) -> &str {
        "recording"
    }

    fn hand_off(&mut self, config: ResolvedConfig) -> Result<()> {
        self.received.push(config);
        Ok(())
    }
}

/// Every required key, with `WP_HOME` set to `https://example.com`.
#[allow(dead_code)]
pub fn full_env() -> HashMap<String, String> {
    let mut values: HashMap<String, String> = REQUIRED_KEYS
        .iter()
        .map(|key| (key.to_string(), key.to_lowercase()))
        .collect();
    values.insert(keys::WP_HOME.to_string(), "https://example.com".to_string());
    values
}

/// [`full_env`] with `overrides` applied.
#[allow(dead_code)]
pub fn env_with(overrides: &[(&str, &str)]) -> EnvVarAdapter {
    let mut values = full_env();
    for (key, value) in overrides {
        values.insert(key.to_string(), value.to_string());
    }
    EnvVarAdapter::with_values(values)
}
