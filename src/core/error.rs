//! Setup-time error types
//!
//! These are the only failures that abort a run. Anything that goes wrong for a
//! single repository is reported through its outcome instead.

use thiserror::Error;

/// Invalid run configuration
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("you can't use both --exclude-repos and --include-repos")]
    ConflictingFilters,

    #[error("parallelism must be at least 1")]
    ZeroParallelism,
}

/// Missing prerequisite detected before any repository work starts
#[derive(Debug, Error)]
pub enum PreflightError {
    #[error("environment variable {0} is required")]
    MissingEnv(&'static str),

    #[error("could not find command git, please install it: {0}")]
    GitNotFound(String),

    #[error("could not create destination directory {path}: {source}")]
    Destination {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
