//! Logging setup.
//!
//! Configuration output goes to stdout, so logs default to stderr.

use anyhow::Result;
use std::fs::OpenOptions;
use tracing_subscriber::EnvFilter;

/// Where log lines are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    Off,
    Stdout,
    Stderr,
    File(String),
}

impl LogDestination {
    /// Parse `0/off`, `1/stdout`, `2/stderr` or a file name.
    pub fn parse(value: &str) -> Self {
        match value {
            "0" | "off" => LogDestination::Off,
            "1" | "stdout" => LogDestination::Stdout,
            "2" | "stderr" => LogDestination::Stderr,
            filename => LogDestination::File(filename.to_string()),
        }
    }
}

/// Build the filter: `RUST_LOG` wins, otherwise info (debug when verbose).
fn env_filter(verbose: bool) -> EnvFilter {
    let level = if verbose { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Install the global subscriber.
pub fn init(destination: &LogDestination, verbose: bool) -> Result<()> {
    match destination {
        LogDestination::Off => {
            // No logging
        }
        LogDestination::Stdout => {
            let subscriber = tracing_subscriber::fmt()
                .with_env_filter(env_filter(verbose))
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        LogDestination::Stderr => {
            let subscriber = tracing_subscriber::fmt()
                .with_env_filter(env_filter(verbose))
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        LogDestination::File(filename) => {
            // Log to file (append mode)
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(filename)?;
            let subscriber = tracing_subscriber::fmt()
                .with_env_filter(env_filter(verbose))
                .with_writer(file)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }
    Ok(())
}
