// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the bootstrap resolver.
//!
//! Every failure the resolver can produce is a variant of [`ConfigError`]. The
//! library never terminates the process itself; entry points receive these
//! errors and decide what to do with them.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for bootstrap resolution.
///
/// Resolution is all-or-nothing: when any of these is returned, no
/// configuration has been handed to a bootstrap host.
///
/// # Examples
///
/// ```
/// use mantle::domain::errors::ConfigError;
///
/// let error = ConfigError::MissingEnvVar {
///     key: "DB_NAME".to_string(),
/// };
/// assert_eq!(error.to_string(), "Missing env var: DB_NAME");
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A required environment variable is absent.
    #[error("Missing env var: {key}")]
    MissingEnvVar {
        /// The missing variable name
        key: String,
    },

    /// The environment-tier override file selected by `WP_ENV` does not exist.
    #[error("Missing environment tier file: {}", path.display())]
    MissingTierFile {
        /// The path that was looked up
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// `WP_ENV` cannot be used to build a tier file name.
    #[error("Invalid environment tier name '{tier}': {reason}")]
    InvalidTierName {
        /// The offending tier name
        tier: String,
        /// Why it was rejected
        reason: &'static str,
    },

    /// A constant was defined twice.
    #[error("Constant already defined: {key}")]
    AlreadyDefined {
        /// The key that already had a value
        key: String,
    },

    /// An error occurred in an environment reader.
    #[error("Environment source '{source_name}' error: {message}")]
    SourceError {
        /// The name of the source that encountered the error
        source_name: String,
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failed to parse a `.env` or tier file.
    #[error("Failed to parse configuration: {message}")]
    ParseError {
        /// The error message
        message: String,
        /// The underlying parsing error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The bootstrap host failed to take over.
    #[error("Bootstrap host '{host}' failed: {message}")]
    HostError {
        /// The host name
        host: String,
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A specialized Result type for bootstrap operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_env_var_message() {
        let error = ConfigError::MissingEnvVar {
            key: "AUTH_KEY".to_string(),
        };
        assert_eq!(error.to_string(), "Missing env var: AUTH_KEY");
    }

    #[test]
    fn test_missing_tier_file_message() {
        let error = ConfigError::MissingTierFile {
            path: PathBuf::from("/srv/site/staging-env.yaml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(
            error.to_string(),
            "Missing environment tier file: /srv/site/staging-env.yaml"
        );
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_invalid_tier_name() {
        let error = ConfigError::InvalidTierName {
            tier: "../etc".to_string(),
            reason: "contains a path separator",
        };
        assert!(error.to_string().contains("../etc"));
    }

    #[test]
    fn test_source_error() {
        let error = ConfigError::SourceError {
            source_name: "dotenv".to_string(),
            message: "Failed to read file".to_string(),
            source: None,
        };
        assert_eq!(
            error.to_string(),
            "Environment source 'dotenv' error: Failed to read file"
        );
    }

    #[test]
    fn test_host_error() {
        let error = ConfigError::HostError {
            host: "exec".to_string(),
            message: "no such program".to_string(),
            source: None,
        };
        assert_eq!(
            error.to_string(),
            "Bootstrap host 'exec' failed: no such program"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = ConfigError::from(io_error);
        assert!(matches!(error, ConfigError::IoError(_)));
    }
}
