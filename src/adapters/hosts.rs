// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bootstrap host adapters.
//!
//! [`ExecHost`] replaces the current process with the platform's settings
//! loader and passes every constant in its environment. [`EmitHost`] writes
//! the configuration out for an outer process that loads it itself.

use crate::adapters::dotenv_file::quote_value;
use crate::domain::{ConfigError, ResolvedConfig, Result};
use crate::ports::BootstrapHost;
use std::ffi::OsString;
use std::io::{self, Write};
use std::process::Command;

/// Hands off to a settings loader command.
///
/// On Unix the current process is replaced via `exec`, so a successful
/// hand-off never returns. Elsewhere the command is run to completion and a
/// non-zero exit status is reported as an error.
///
/// # Examples
///
/// ```rust
/// use mantle::adapters::ExecHost;
///
/// let host = ExecHost::new("php-fpm").arg("--nodaemonize");
/// ```
#[derive(Debug, Clone)]
pub struct ExecHost {
    program: OsString,
    args: Vec<OsString>,
}

impl ExecHost {
    /// Creates a host that runs `program`.
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Appends an argument.
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Builds the command, with each constant exported as an environment variable.
    ///
    /// Flags are exported as `1` and the empty string.
    pub fn command(&self, config: &ResolvedConfig) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        for (key, value) in config.iter() {
            command.env(key.as_str(), value.to_env_string());
        }
        command
    }

    fn host_error(&self, message: String, source: Option<io::Error>) -> ConfigError {
        ConfigError::HostError {
            host: self.name().to_string(),
            message,
            source: source.map(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
        }
    }
}

impl BootstrapHost for ExecHost {
    fn name(&self) -> &str {
        "exec"
    }

    fn hand_off(&mut self, config: ResolvedConfig) -> Result<()> {
        let command = self.command(&config);
        tracing::info!(
            "Handing off {} constants to {}",
            config.len(),
            self.program.to_string_lossy()
        );

        self.run(command)
    }
}

impl ExecHost {
    #[cfg(unix)]
    fn run(&self, mut command: Command) -> Result<()> {
        use std::os::unix::process::CommandExt;
        // exec only returns on failure
        let err = command.exec();
        Err(self.host_error(
            format!("failed to exec {}", self.program.to_string_lossy()),
            Some(err),
        ))
    }

    #[cfg(not(unix))]
    fn run(&self, mut command: Command) -> Result<()> {
        let status = command.status().map_err(|e| {
            self.host_error(
                format!("failed to run {}", self.program.to_string_lossy()),
                Some(e),
            )
        })?;
        if status.success() {
            Ok(())
        } else {
            Err(self.host_error(format!("settings loader exited with {}", status), None))
        }
    }
}

/// Output formats for [`EmitHost`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    /// A YAML mapping, flags as YAML booleans.
    #[cfg(feature = "yaml")]
    Yaml,
    /// `NAME=value` lines, quoted for POSIX shells; flags as `1` and empty.
    Env,
}

/// Writes the configuration to a writer.
///
/// # Examples
///
/// ```rust
/// use mantle::adapters::{EmitHost, OutputFormat};
/// use mantle::domain::ConstantTable;
/// use mantle::ports::BootstrapHost;
///
/// let mut table = ConstantTable::new();
/// table.define("DB_CHARSET", "utf8mb4").unwrap();
/// table.define("DB_COLLATE", "").unwrap();
///
/// let mut host = EmitHost::new(Vec::new(), OutputFormat::Env);
/// host.hand_off(table.freeze()).unwrap();
/// assert_eq!(host.into_inner(), b"DB_CHARSET=utf8mb4\nDB_COLLATE=''\n");
/// ```
#[derive(Debug)]
pub struct EmitHost<W: Write> {
    writer: W,
    format: OutputFormat,
}

impl EmitHost<io::Stdout> {
    /// A host that writes to standard output.
    pub fn stdout(format: OutputFormat) -> Self {
        Self::new(io::stdout(), format)
    }
}

impl<W: Write> EmitHost<W> {
    /// A host that writes to `writer`.
    pub fn new(writer: W, format: OutputFormat) -> Self {
        Self { writer, format }
    }

    /// Returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn render(&self, config: &ResolvedConfig) -> Result<String> {
        match self.format {
            #[cfg(feature = "yaml")]
            OutputFormat::Yaml => {
                serde_yaml::to_string(config).map_err(|e| ConfigError::HostError {
                    host: "emit".to_string(),
                    message: "failed to serialize configuration".to_string(),
                    source: Some(Box::new(e)),
                })
            }
            OutputFormat::Env => Ok(config
                .iter()
                .map(|(key, value)| format!("{}={}\n", key, quote_value(&value.to_env_string())))
                .collect()),
        }
    }
}

impl<W: Write> BootstrapHost for EmitHost<W> {
    fn name(&self) -> &str {
        "emit"
    }

    fn hand_off(&mut self, config: ResolvedConfig) -> Result<()> {
        let rendered = self.render(&config)?;
        self.writer.write_all(rendered.as_bytes())?;
        self.writer.flush()?;
        tracing::info!("Emitted {} constants as {:?}", config.len(), self.format);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConstantTable;
    use std::ffi::OsStr;

    fn sample() -> ResolvedConfig {
        let mut table = ConstantTable::new();
        table.define("WP_HOME", "https://example.com").unwrap();
        table.define("DISALLOW_FILE_EDIT", true).unwrap();
        table.define("DISABLE_WP_CRON", false).unwrap();
        table.define("DB_PASSWORD", "p@ss word").unwrap();
        table.freeze()
    }

    #[test]
    fn test_exec_command_exports_constants() {
        let host = ExecHost::new("php").args(["-f", "wp-settings.php"]);
        let command = host.command(&sample());

        assert_eq!(command.get_program(), OsStr::new("php"));
        let args: Vec<&OsStr> = command.get_args().collect();
        assert_eq!(args, vec![OsStr::new("-f"), OsStr::new("wp-settings.php")]);

        let envs: Vec<(&OsStr, Option<&OsStr>)> = command.get_envs().collect();
        assert!(envs.contains(&(OsStr::new("WP_HOME"), Some(OsStr::new("https://example.com")))));
        assert!(envs.contains(&(OsStr::new("DISALLOW_FILE_EDIT"), Some(OsStr::new("1")))));
        assert!(envs.contains(&(OsStr::new("DISABLE_WP_CRON"), Some(OsStr::new("")))));
    }

    #[cfg(unix)]
    #[test]
    fn test_exec_missing_program_is_host_error() {
        let mut host = ExecHost::new("/nonexistent/mantle/settings-loader");
        let err = host.hand_off(sample()).unwrap_err();
        assert!(matches!(err, ConfigError::HostError { ref host, .. } if host == "exec"));
    }

    #[test]
    fn test_emit_env_format() {
        let mut host = EmitHost::new(Vec::new(), OutputFormat::Env);
        host.hand_off(sample()).unwrap();

        let output = String::from_utf8(host.into_inner()).unwrap();
        assert_eq!(
            output,
            "WP_HOME=https://example.com\nDISALLOW_FILE_EDIT=1\nDISABLE_WP_CRON=''\nDB_PASSWORD='p@ss word'\n"
        );
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn test_emit_yaml_format() {
        let mut host = EmitHost::new(Vec::new(), OutputFormat::Yaml);
        host.hand_off(sample()).unwrap();

        let output = String::from_utf8(host.into_inner()).unwrap();
        let parsed: serde_yaml::Mapping = serde_yaml::from_str(&output).unwrap();
        assert_eq!(parsed.len(), 4);
        assert_eq!(
            parsed.get("DISALLOW_FILE_EDIT"),
            Some(&serde_yaml::Value::Bool(true))
        );
        assert!(output.starts_with("WP_HOME:"));
    }
}
