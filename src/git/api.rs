//! Public API for git operations.
//!
//! Git is only ever run as an external process through a [`GitRunner`]; the
//! rest of the crate goes through [`GitExecutor`] and [`probe`].
//!
//! ## Example: Probing a working copy
//!
//! ```rust,no_run
//! use github_org_sync::git::{probe, LocalState, SystemGit};
//! use std::path::Path;
//! use std::time::Duration;
//!
//! async fn check(root: &Path) -> anyhow::Result<()> {
//!     let git = SystemGit::new(Duration::from_secs(60));
//!     if probe(&git, root, "widgets").await? == LocalState::DirtyRepo {
//!         println!("widgets has local changes");
//!     }
//!     Ok(())
//! }
//! ```

// Runner and operations
pub use super::operations::{GitError, GitExecutor, GitOp, GitOutput, GitRunner, SystemGit};

// Local state
pub use super::probe::{has_git_dir, probe, probe_path, LocalState};

// Status
pub use super::status::Status;
