//! Public API for the core module.
//!
//! This module provides the stable public API for core functionality including:
//! - Run configuration and filter validation
//! - Pre-flight checks
//! - Action selection
//! - Statistics and per-repository outcomes
//!
//! Internal implementation details are not exposed through this API.

// Configuration
pub use super::config::{repo_path, FilterConfig, SyncConfig};
pub use super::config::{DEFAULT_PARALLELISM, GITHUB_API_BASE, GIT_OPERATION_TIMEOUT_SECS};
pub use super::error::{ConfigError, PreflightError};
pub use super::preflight::{ensure_git_available, prepare_destination, read_token};

// Logging
pub use super::logging::{init_logging, LogLevel};

// Action selection
pub use super::select::{prefilter, select_action, Action, SkipReason};

// Results
pub use super::progress::{create_processing_context, ProcessingContext};
pub use super::stats::{RepoOutcome, SyncStatistics};

// User-facing messages
pub use super::config::{LISTING_MESSAGE, NO_REPOS_MESSAGE};

// Terminal utilities (re-exported from utils)
pub use crate::utils::{set_terminal_title, set_terminal_title_and_flush};

// Internal helpers for other modules
pub(crate) use super::stats::clean_error_message;
