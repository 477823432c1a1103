//! Logging initialization
//!
//! Log lines go to stderr through the active `MultiProgress`, which hides its
//! bars while a line is printed and redraws them afterwards.

use indicatif::MultiProgress;
use std::io::{self, Write};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Verbosity selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Quiet,
    Normal,
    Verbose,
}

impl LogLevel {
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if verbose {
            LogLevel::Verbose
        } else if quiet {
            LogLevel::Quiet
        } else {
            LogLevel::Normal
        }
    }

    fn directive(&self) -> &'static str {
        match self {
            LogLevel::Quiet => "warn",
            LogLevel::Normal => "info",
            LogLevel::Verbose => "debug",
        }
    }
}

/// Stderr writer that suspends progress bars while writing
struct ProgressWriter {
    multi: MultiProgress,
}

impl Write for ProgressWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.multi.suspend(|| io::stderr().write_all(buf))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

/// Installs the global subscriber; `RUST_LOG` takes precedence over `level`
pub fn init_logging(multi: &MultiProgress, level: LogLevel) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.directive()));

    let multi = multi.clone();
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(move || ProgressWriter {
                    multi: multi.clone(),
                }),
        )
        .try_init()?;

    Ok(())
}
