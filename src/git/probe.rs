//! Local working copy inspection
//!
//! Probing never writes: no index refresh, no fetch. It only asks git whether
//! HEAD resolves and whether the index or working tree differ from it.

use std::path::Path;

use super::operations::{GitError, GitOp, GitRunner};
use crate::core::clean_error_message;

const GIT_DIR: &str = ".git";
const GIT_REV_PARSE_HEAD_ARGS: &[&str] = &["rev-parse", "--quiet", "--verify", "HEAD"];
const GIT_DIFF_INDEX_CACHED_ARGS: &[&str] = &["diff-index", "--quiet", "--cached", "HEAD", "--"];
const GIT_DIFF_FILES_ARGS: &[&str] = &["diff-files", "--quiet"];

/// State of the local copy of a repository, computed fresh for every run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalState {
    /// No `.git` at the expected location
    Absent,
    /// `.git` exists but HEAD does not resolve to a commit
    EmptyRepo,
    /// HEAD resolves and neither index nor working tree differ from it
    CleanRepo,
    /// HEAD resolves and there are staged or unstaged changes
    DirtyRepo,
}

/// Cheap filesystem-only check for version-control metadata
pub fn has_git_dir(repo_path: &Path) -> bool {
    // `.git` may be a file for worktrees and submodules
    repo_path.join(GIT_DIR).exists()
}

/// Determines the local state of `dest_root/name`.
///
/// Exit statuses decide the state. A git invocation that could not run to
/// completion (spawn failure, timeout) leaves the state unknown and is
/// returned as an error instead.
pub async fn probe(
    runner: &dyn GitRunner,
    dest_root: &Path,
    name: &str,
) -> Result<LocalState, GitError> {
    let repo_path = dest_root.join(name);
    probe_path(runner, &repo_path).await
}

pub async fn probe_path(runner: &dyn GitRunner, repo_path: &Path) -> Result<LocalState, GitError> {
    if !has_git_dir(repo_path) {
        return Ok(LocalState::Absent);
    }

    if !check(runner, GitOp::RevParse, repo_path, GIT_REV_PARSE_HEAD_ARGS).await? {
        return Ok(LocalState::EmptyRepo);
    }
    if !check(runner, GitOp::DiffIndex, repo_path, GIT_DIFF_INDEX_CACHED_ARGS).await? {
        return Ok(LocalState::DirtyRepo);
    }
    if !check(runner, GitOp::DiffFiles, repo_path, GIT_DIFF_FILES_ARGS).await? {
        return Ok(LocalState::DirtyRepo);
    }
    Ok(LocalState::CleanRepo)
}

/// Exit status of one read-only check
async fn check(
    runner: &dyn GitRunner,
    op: GitOp,
    repo_path: &Path,
    args: &[&str],
) -> Result<bool, GitError> {
    runner
        .run(op, repo_path, args)
        .await
        .map(|output| output.success)
        .map_err(|e| GitError {
            op,
            message: clean_error_message(&e.to_string()),
        })
}
