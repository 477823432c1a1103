//! Git command execution and the repository-level operations built on it

use anyhow::Result;
use async_trait::async_trait;
use std::fmt;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;

use crate::core::clean_error_message;

// Git command arguments
const GIT_CLONE_ARGS: &[&str] = &["clone", "--quiet"];
const GIT_STASH_ARGS: &[&str] = &["stash", "push"];
const GIT_FETCH_ORIGIN_ARGS: &[&str] = &["fetch", "--quiet", "origin"];
const GIT_CHECKOUT_ARGS: &[&str] = &["checkout", "--quiet"];
const GIT_PULL_REBASE_ARGS: &[&str] = &["pull", "--quiet", "--rebase"];

/// The git invocations this tool makes, used for logging and by test runners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GitOp {
    Clone,
    Stash,
    Fetch,
    Checkout,
    Pull,
    RevParse,
    DiffIndex,
    DiffFiles,
}

impl GitOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            GitOp::Clone => "clone",
            GitOp::Stash => "stash",
            GitOp::Fetch => "fetch",
            GitOp::Checkout => "checkout",
            GitOp::Pull => "pull",
            GitOp::RevParse => "rev-parse",
            GitOp::DiffIndex => "diff-index",
            GitOp::DiffFiles => "diff-files",
        }
    }
}

impl fmt::Display for GitOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exit status and trimmed output of one git invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Runs git. `Err` means the process could not be run to completion at all
/// (spawn failure, timeout); a non-zero exit is `Ok` with `success == false`.
#[async_trait]
pub trait GitRunner: Send + Sync {
    async fn run(&self, op: GitOp, dir: &Path, args: &[&str]) -> Result<GitOutput>;
}

/// `GitRunner` that spawns the `git` found on PATH
#[derive(Debug, Clone)]
pub struct SystemGit {
    timeout: Duration,
}

impl SystemGit {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl GitRunner for SystemGit {
    async fn run(&self, op: GitOp, dir: &Path, args: &[&str]) -> Result<GitOutput> {
        tracing::debug!(%op, dir = %dir.display(), ?args, "running git");

        // kill_on_drop makes the timeout an actual cancellation of the child
        let mut command = Command::new("git");
        command.args(args).current_dir(dir).kill_on_drop(true);

        match tokio::time::timeout(self.timeout, command.output()).await {
            Ok(Ok(output)) => Ok(GitOutput {
                success: output.status.success(),
                stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }),
            Ok(Err(e)) => Err(e.into()),
            Err(_) => Err(anyhow::anyhow!(
                "git {} timed out after {} seconds",
                op,
                self.timeout.as_secs()
            )),
        }
    }
}

/// A failed repository-scoped git operation
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{op} failed: {message}")]
pub struct GitError {
    pub op: GitOp,
    pub message: String,
}

/// Repository-level git operations, each mapped to success or a `GitError`
#[derive(Clone, Copy)]
pub struct GitExecutor<'a> {
    runner: &'a dyn GitRunner,
}

impl<'a> GitExecutor<'a> {
    pub fn new(runner: &'a dyn GitRunner) -> Self {
        Self { runner }
    }

    /// Full clone of `clone_url` into `dest`.
    ///
    /// Git runs from the parent of `dest` and is given only the final path
    /// component, so relative destinations resolve the same way for both.
    pub async fn clone_repo(&self, clone_url: &str, dest: &Path) -> Result<(), GitError> {
        let (dir, target) = match (dest.parent(), dest.file_name()) {
            (Some(parent), Some(name)) if !parent.as_os_str().is_empty() => (parent, name),
            _ => (Path::new("."), dest.as_os_str()),
        };
        let target = target.to_string_lossy();
        let mut args = Vec::from(GIT_CLONE_ARGS);
        args.push(clone_url);
        args.push(target.as_ref());
        self.exec(GitOp::Clone, dir, &args).await
    }

    /// Stashes working tree and index changes
    pub async fn stash(&self, repo_path: &Path) -> Result<(), GitError> {
        self.exec(GitOp::Stash, repo_path, GIT_STASH_ARGS).await
    }

    pub async fn fetch_origin(&self, repo_path: &Path) -> Result<(), GitError> {
        self.exec(GitOp::Fetch, repo_path, GIT_FETCH_ORIGIN_ARGS).await
    }

    pub async fn checkout_default_branch(
        &self,
        repo_path: &Path,
        branch: &str,
    ) -> Result<(), GitError> {
        let mut args = Vec::from(GIT_CHECKOUT_ARGS);
        args.push(branch);
        self.exec(GitOp::Checkout, repo_path, &args).await
    }

    /// Brings the checked-out branch up to date with `pull --rebase`
    pub async fn pull_rebase(&self, repo_path: &Path) -> Result<(), GitError> {
        self.exec(GitOp::Pull, repo_path, GIT_PULL_REBASE_ARGS).await
    }

    async fn exec(&self, op: GitOp, dir: &Path, args: &[&str]) -> Result<(), GitError> {
        match self.runner.run(op, dir, args).await {
            Ok(output) if output.success => Ok(()),
            Ok(output) => {
                let detail = if output.stderr.is_empty() {
                    output.stdout
                } else {
                    output.stderr
                };
                let message = if detail.is_empty() {
                    "exited with non-zero status".to_string()
                } else {
                    clean_error_message(&detail)
                };
                Err(GitError { op, message })
            }
            Err(e) => Err(GitError {
                op,
                message: clean_error_message(&e.to_string()),
            }),
        }
    }
}
