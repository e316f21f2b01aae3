// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing port implementations.
//!
//! Environment readers (process environment, `.env` files), constant file
//! parsers and the tier file loader, and the bootstrap hosts.

pub mod dotenv_file;
pub mod env_var;
pub mod hosts;
pub mod tier_file;
#[cfg(feature = "yaml")]
pub mod yaml_file;

pub use dotenv_file::{DotenvFileAdapter, DotenvParser};
pub use env_var::EnvVarAdapter;
pub use hosts::{EmitHost, ExecHost, OutputFormat};
pub use tier_file::TierFileLoader;
#[cfg(feature = "yaml")]
pub use yaml_file::YamlParser;

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Reads a whole file, refusing anything larger than `max_size` bytes.
pub(crate) fn read_capped(path: &Path, max_size: u64) -> io::Result<String> {
    let file = File::open(path)?;
    let len = file.metadata()?.len();
    if len > max_size {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("file too large: {} bytes (max {} bytes)", len, max_size),
        ));
    }

    let mut content = String::with_capacity(len as usize);
    // take() guards against the file growing between metadata and read
    file.take(max_size).read_to_string(&mut content)?;
    Ok(content)
}
