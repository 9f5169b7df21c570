// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `taskdag`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "taskdag",
    version,
    about = "Lay out a task dependency board and replay canvas gestures against it.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the board file (TOML).
    ///
    /// Default: `Taskdag.toml` in the current working directory.
    #[arg(long, value_name = "PATH")]
    pub board: Option<PathBuf>,

    /// Parse + validate, print partition, grid positions and pool, then exit.
    #[arg(long)]
    pub dry_run: bool,

    /// Print the flat table view and exit.
    #[arg(long, conflicts_with = "dry_run")]
    pub table: bool,

    /// Replay a gesture script (TOML) through the runtime.
    #[arg(long, value_name = "PATH")]
    pub script: Option<String>,

    /// Start with automatic layout switched off.
    #[arg(long)]
    pub no_auto_layout: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TASKDAG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
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
