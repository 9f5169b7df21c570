// src/logging.rs

//! Logging setup using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the filter:
//! 1. `--log-level` CLI flag (if provided), applied to `taskdag` only
//! 2. `TASKDAG_LOG` environment variable, either a bare level ("debug") or
//!    full directives ("info,taskdag::layout=trace")
//! 3. default to `info` for `taskdag` and `warn` for everything else
//!
//! Logs go to STDERR; STDOUT carries the printed board.

use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

pub const LOG_ENV_VAR: &str = "TASKDAG_LOG";

const DEFAULT_DIRECTIVES: &str = "warn,taskdag=info";

/// Initialise the global logging subscriber. Call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env = std::env::var(LOG_ENV_VAR).ok();
    let directives = filter_directives(cli_level, env.as_deref());

    // A malformed env value falls back to the default instead of aborting.
    let (filter, rejected) = match EnvFilter::try_new(&directives) {
        Ok(filter) => (filter, None),
        Err(e) => (EnvFilter::new(DEFAULT_DIRECTIVES), Some(e)),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {e}"))?;

    if let Some(e) = rejected {
        tracing::warn!(%directives, error = %e, "ignoring invalid TASKDAG_LOG");
    }
    Ok(())
}

/// Filter directives for the given CLI flag and `TASKDAG_LOG` value.
///
/// A bare level only raises this crate's verbosity; dependencies stay at
/// `warn` so tokio internals do not flood the board output.
pub fn filter_directives(cli_level: Option<LogLevel>, env: Option<&str>) -> String {
    if let Some(level) = cli_level {
        return crate_directives(level_name(level));
    }

    match env.map(str::trim).filter(|s| !s.is_empty()) {
        Some(value) => match parse_level_str(value) {
            Some(level) => crate_directives(level),
            None => value.to_string(),
        },
        None => DEFAULT_DIRECTIVES.to_string(),
    }
}

fn crate_directives(level: &str) -> String {
    format!("warn,taskdag={level}")
}

fn level_name(lvl: LogLevel) -> &'static str {
    match lvl {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}

fn parse_level_str(s: &str) -> Option<&'static str> {
    match s.to_lowercase().as_str() {
        "error" => Some("error"),
        "warn" | "warning" => Some("warn"),
        "info" => Some("info"),
        "debug" => Some("debug"),
        "trace" => Some("trace"),
        _ => None,
    }
}
