//! # github-org-sync
//!
//! `github-org-sync` mirrors every accessible repository of a GitHub
//! organization into a local directory tree. It powers the `github-org-sync`
//! CLI tool.
//!
//! ## Core Features
//!
//! - **Listing**: Paginated organization listing through the GitHub REST API.
//! - **Reconciliation**: Missing repositories are cloned, existing ones are
//!   fetched, switched to their default branch and rebased, with local changes
//!   stashed first.
//! - **Bounded Concurrency**: A fixed-size slot pool caps simultaneous git
//!   processes; one repository's failure never affects another.
//!
//! ## Example
//!
//! ```rust,no_run
//! use github_org_sync::commands::sync::run;
//! use github_org_sync::core::{FilterConfig, SyncConfig};
//! use github_org_sync::git::SystemGit;
//! use github_org_sync::github::{GitHubClient, RepoLister};
//! use indicatif::MultiProgress;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = SyncConfig::new("acme", "./mirror", FilterConfig::default(), 4)?;
//!     let client = GitHubClient::new(std::env::var("GITHUB_TOKEN")?)?;
//!     let repos = client.list_org_repositories(&config.org).await?;
//!     let git = Arc::new(SystemGit::new(config.git_timeout));
//!     let report = run(&repos, &config, git, MultiProgress::new()).await?;
//!     println!("{} failed", report.statistics.failures());
//!     Ok(())
//! }
//! ```

pub mod commands;
pub mod core;
pub mod git;
pub mod github;
pub mod utils;
