//! Local state probing against real working copies

mod common;

use anyhow::Result;
use common::{create_test_commit, git_output, is_git_available, setup_git_repo};
use github_org_sync::git::{probe, LocalState, SystemGit};
use std::time::Duration;
use tempfile::TempDir;

fn git() -> SystemGit {
    SystemGit::new(Duration::from_secs(30))
}

/// Creates `root/name` as a repository with one commit
fn committed_repo(root: &std::path::Path, name: &str) -> Result<()> {
    let path = root.join(name);
    std::fs::create_dir(&path)?;
    setup_git_repo(&path)?;
    create_test_commit(&path, "README.md", "hello\n", "Initial commit")
}

#[tokio::test]
async fn test_absent_and_plain_directory() -> Result<()> {
    let root = TempDir::new()?;
    std::fs::create_dir(root.path().join("plain"))?;

    assert_eq!(probe(&git(), root.path(), "missing").await?, LocalState::Absent);
    assert_eq!(probe(&git(), root.path(), "plain").await?, LocalState::Absent);

    Ok(())
}

#[tokio::test]
async fn test_freshly_initialized_repo_is_empty() -> Result<()> {
    if !is_git_available() {
        eprintln!("Git not available, skipping test");
        return Ok(());
    }

    let root = TempDir::new()?;
    let path = root.path().join("new");
    std::fs::create_dir(&path)?;
    setup_git_repo(&path)?;

    assert_eq!(probe(&git(), root.path(), "new").await?, LocalState::EmptyRepo);

    Ok(())
}

#[tokio::test]
async fn test_committed_repo_is_clean() -> Result<()> {
    if !is_git_available() {
        eprintln!("Git not available, skipping test");
        return Ok(());
    }

    let root = TempDir::new()?;
    committed_repo(root.path(), "clean")?;

    assert_eq!(probe(&git(), root.path(), "clean").await?, LocalState::CleanRepo);

    Ok(())
}

#[tokio::test]
async fn test_untracked_files_do_not_make_a_repo_dirty() -> Result<()> {
    if !is_git_available() {
        eprintln!("Git not available, skipping test");
        return Ok(());
    }

    let root = TempDir::new()?;
    committed_repo(root.path(), "scratch")?;
    std::fs::write(root.path().join("scratch").join("notes.txt"), "todo\n")?;

    assert_eq!(probe(&git(), root.path(), "scratch").await?, LocalState::CleanRepo);

    Ok(())
}

#[tokio::test]
async fn test_unstaged_change_is_dirty() -> Result<()> {
    if !is_git_available() {
        eprintln!("Git not available, skipping test");
        return Ok(());
    }

    let root = TempDir::new()?;
    committed_repo(root.path(), "edited")?;
    std::fs::write(root.path().join("edited").join("README.md"), "changed\n")?;

    assert_eq!(probe(&git(), root.path(), "edited").await?, LocalState::DirtyRepo);

    Ok(())
}

#[tokio::test]
async fn test_staged_change_is_dirty_and_probe_does_not_touch_it() -> Result<()> {
    if !is_git_available() {
        eprintln!("Git not available, skipping test");
        return Ok(());
    }

    let root = TempDir::new()?;
    committed_repo(root.path(), "staged")?;
    let path = root.path().join("staged");
    std::fs::write(path.join("NEW.md"), "new\n")?;
    git_output(&path, &["add", "NEW.md"])?;

    let before = git_output(&path, &["status", "--porcelain"])?;
    assert_eq!(probe(&git(), root.path(), "staged").await?, LocalState::DirtyRepo);
    let after = git_output(&path, &["status", "--porcelain"])?;

    assert_eq!(before, after);

    Ok(())
}
