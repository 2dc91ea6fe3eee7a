// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::default_plan_path;

/// Command-line arguments for `pyority`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "pyority",
    version,
    about = "Order tasks consistently with their dependencies, heaviest first.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the plan file (TOML).
    ///
    /// Default: `Pyority.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value_os_t = default_plan_path())]
    pub plan: PathBuf,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `PYORITY_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate and print the tasks, but don't compute an order.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_defaults_to_file_in_working_directory() {
        let args = CliArgs::try_parse_from(["pyority"]).unwrap();
        assert_eq!(args.plan, default_plan_path());
        assert!(!args.dry_run);
    }

    #[test]
    fn plan_path_can_be_overridden() {
        let args = CliArgs::try_parse_from(["pyority", "--plan", "plans/release.toml", "--dry-run"])
            .unwrap();
        assert_eq!(args.plan, PathBuf::from("plans/release.toml"));
        assert!(args.dry_run);
    }
}
