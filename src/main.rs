// SPDX-License-Identifier: MIT OR Apache-2.0

//! `mantle`: resolve the bootstrap configuration and hand it off.

use clap::{ArgAction, Args, Parser, Subcommand};
use mantle::adapters::{EmitHost, ExecHost, OutputFormat};
use mantle::entry::{self, EntryOptions};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "mantle", version, about = "WordPress bootstrap configuration resolver")]
struct Cli {
    #[command(flatten)]
    options: CommonArgs,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Install directory (defaults to the directory of this executable)
    #[arg(long, global = true, env = "MANTLE_DIR", value_name = "PATH")]
    dir: Option<PathBuf>,

    /// `.env` file to read (defaults to `<dir>/.env` when present)
    #[arg(long, global = true, env = "MANTLE_ENV_FILE", value_name = "PATH")]
    env_file: Option<PathBuf>,

    /// Read only process variables with this prefix, stripping it
    #[arg(long, global = true, value_name = "PREFIX")]
    env_prefix: Option<String>,

    /// Suffix appended to WP_ENV to name the tier file
    #[arg(long, global = true, env = "MANTLE_TIER_SUFFIX", value_name = "SUFFIX")]
    tier_suffix: Option<String>,

    /// Define a constant before resolution (repeatable)
    #[arg(long = "define", short = 'D', global = true, value_name = "KEY=VALUE", value_parser = parse_define)]
    define: Vec<(String, String)>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Single-root install: exec the settings loader with the constants in its environment
    Public {
        /// Settings loader program
        #[arg(value_name = "LOADER")]
        program: OsString,

        /// Arguments passed to the settings loader
        #[arg(last = true, value_name = "ARGS")]
        args: Vec<OsString>,
    },
    /// Split-public install: print the constants for an outer loader
    Boot {
        /// Output format
        #[arg(long, value_enum, default_value_t = default_format())]
        format: OutputFormat,
    },
}

#[cfg(feature = "yaml")]
fn default_format() -> OutputFormat {
    OutputFormat::Yaml
}

#[cfg(not(feature = "yaml"))]
fn default_format() -> OutputFormat {
    OutputFormat::Env
}

fn parse_define(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}

impl From<CommonArgs> for EntryOptions {
    fn from(args: CommonArgs) -> Self {
        EntryOptions {
            dir: args.dir,
            env_file: args.env_file,
            env_prefix: args.env_prefix,
            tier_suffix: args.tier_suffix,
            preset: args.define,
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => tracing::Level::ERROR,
        (false, 0) => tracing::Level::WARN,
        (false, 1) => tracing::Level::DEBUG,
        (false, _) => tracing::Level::TRACE,
    };

    // stdout may carry the emitted configuration
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let options = EntryOptions::from(cli.options);
    let result = match cli.command {
        Command::Public { program, args } => {
            let mut host = ExecHost::new(program).args(args);
            entry::run_public(&options, &mut host)
        }
        Command::Boot { format } => {
            let mut host = EmitHost::stdout(format);
            entry::run_boot(&options, &mut host)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_public_with_loader() {
        let cli = Cli::try_parse_from([
            "mantle", "public", "--dir", "/srv/site", "-D", "ABSPATH=/opt/wp/", "php", "--",
            "-f", "wp-settings.php",
        ])
        .unwrap();

        assert_eq!(cli.options.dir, Some(PathBuf::from("/srv/site")));
        assert_eq!(
            cli.options.define,
            vec![("ABSPATH".to_string(), "/opt/wp/".to_string())]
        );
        match cli.command {
            Command::Public { program, args } => {
                assert_eq!(program, OsString::from("php"));
                assert_eq!(args, vec![OsString::from("-f"), OsString::from("wp-settings.php")]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_public_requires_loader() {
        assert!(Cli::try_parse_from(["mantle", "public"]).is_err());
    }

    #[test]
    fn test_parse_boot_format() {
        let cli = Cli::try_parse_from(["mantle", "boot", "--format", "env"]).unwrap();
        assert!(matches!(cli.command, Command::Boot { format: OutputFormat::Env }));
    }

    #[test]
    fn test_parse_define_rejects_missing_equals() {
        assert!(parse_define("ABSPATH").is_err());
        assert!(parse_define("=x").is_err());
        assert_eq!(
            parse_define("DB_COLLATE=").unwrap(),
            ("DB_COLLATE".to_string(), String::new())
        );
    }
}
