//! Configuration constants and the immutable run configuration

use std::path::{Path, PathBuf};
use std::time::Duration;

use super::error::ConfigError;

// GitHub API
pub const GITHUB_API_BASE: &str = "https://api.github.com";
pub const GITHUB_API_VERSION: &str = "2022-11-28";
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";
pub const USER_AGENT: &str = concat!("github-org-sync/", env!("CARGO_PKG_VERSION"));
pub const REPOS_PER_PAGE: u32 = 100;

// Concurrency and timeouts
pub const DEFAULT_PARALLELISM: usize = 1;
pub const GIT_OPERATION_TIMEOUT_SECS: u64 = 600; // per git invocation, clones of large repos included

// Progress bar configuration
pub const PROGRESS_CHARS: &str = "##-";
pub const PROGRESS_TEMPLATE: &str = "{prefix:.bold} [{bar:30}] {pos}/{len} {wide_msg}";

// UI Constants
pub const NO_REPOS_MESSAGE: &str = "No repositories found for this organization.";
pub const LISTING_MESSAGE: &str = "🔍 Listing organization repositories...";

// Display formatting constants
pub const PATH_DISPLAY_WIDTH: usize = 30;
pub const ERROR_MESSAGE_MAX_LENGTH: usize = 60;
pub const ERROR_MESSAGE_TRUNCATE_LENGTH: usize = 57;

/// Name filters applied to every repository descriptor.
///
/// Include and exclude substrings are mutually exclusive; `new` refuses to build
/// a filter with both set, so a `FilterConfig` value is always valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    include: Option<String>,
    exclude: Option<String>,
    skip_archived: bool,
}

impl FilterConfig {
    /// Builds a filter, treating empty substrings as unset
    pub fn new(
        include: Option<String>,
        exclude: Option<String>,
        skip_archived: bool,
    ) -> Result<Self, ConfigError> {
        let include = include.filter(|s| !s.is_empty());
        let exclude = exclude.filter(|s| !s.is_empty());

        if include.is_some() && exclude.is_some() {
            return Err(ConfigError::ConflictingFilters);
        }

        Ok(Self {
            include,
            exclude,
            skip_archived,
        })
    }

    pub fn include(&self) -> Option<&str> {
        self.include.as_deref()
    }

    pub fn exclude(&self) -> Option<&str> {
        self.exclude.as_deref()
    }

    pub fn skip_archived(&self) -> bool {
        self.skip_archived
    }
}

/// Everything a sync run needs, built once at startup and passed down explicitly
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub org: String,
    pub dest_root: PathBuf,
    pub filter: FilterConfig,
    pub parallelism: usize,
    pub git_timeout: Duration,
}

impl SyncConfig {
    pub fn new(
        org: impl Into<String>,
        dest_root: impl Into<PathBuf>,
        filter: FilterConfig,
        parallelism: usize,
    ) -> Result<Self, ConfigError> {
        if parallelism == 0 {
            return Err(ConfigError::ZeroParallelism);
        }

        Ok(Self {
            org: org.into(),
            dest_root: dest_root.into(),
            filter,
            parallelism,
            git_timeout: Duration::from_secs(GIT_OPERATION_TIMEOUT_SECS),
        })
    }

    /// Overrides the per-invocation git timeout
    pub fn with_git_timeout(mut self, timeout: Duration) -> Self {
        self.git_timeout = timeout;
        self
    }

    /// Local working copy location for a repository
    pub fn repo_path(&self, name: &str) -> PathBuf {
        repo_path(&self.dest_root, name)
    }
}

pub fn repo_path(dest_root: &Path, name: &str) -> PathBuf {
    dest_root.join(name)
}
