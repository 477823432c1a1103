//! Test fixtures: a fake "organization" made of local bare repositories

use anyhow::Result;
use github_org_sync::github::RepositoryDescriptor;
use indicatif::{MultiProgress, ProgressDrawTarget};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::git::{create_test_commit, git_output, setup_git_repo};

/// Descriptor with pull permission and a `main` default branch
pub fn descriptor(name: &str, clone_url: &str) -> RepositoryDescriptor {
    RepositoryDescriptor {
        name: name.to_string(),
        clone_url: clone_url.to_string(),
        default_branch: Some("main".to_string()),
        archived: false,
        permissions: HashMap::from([("pull".to_string(), true)]),
    }
}

/// Progress output that never reaches the terminal
pub fn hidden_progress() -> MultiProgress {
    MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
}

/// Bare "remote" repositories plus the working copies used to push to them
pub struct RemoteOrg {
    pub temp_dir: TempDir,
}

impl RemoteOrg {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        std::fs::create_dir(temp_dir.path().join("work"))?;
        std::fs::create_dir(temp_dir.path().join("remotes"))?;
        Ok(Self { temp_dir })
    }

    fn work_path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join("work").join(name)
    }

    fn bare_path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join("remotes").join(format!("{name}.git"))
    }

    /// Creates a remote repository with one commit and returns its descriptor
    pub fn add_repo(&self, name: &str) -> Result<RepositoryDescriptor> {
        let work = self.work_path(name);
        std::fs::create_dir(&work)?;
        setup_git_repo(&work)?;
        create_test_commit(&work, "README.md", &format!("# {name}\n"), "Initial commit")?;
        let branch = git_output(&work, &["rev-parse", "--abbrev-ref", "HEAD"])?;

        let bare = self.bare_path(name);
        git_output(
            self.temp_dir.path(),
            &["clone", "-q", "--bare", work.to_str().unwrap(), bare.to_str().unwrap()],
        )?;
        git_output(&work, &["remote", "add", "origin", bare.to_str().unwrap()])?;

        let mut repo = descriptor(name, &bare.to_string_lossy());
        repo.default_branch = Some(branch);
        Ok(repo)
    }

    /// Pushes a new commit to the remote of `name`
    pub fn push_commit(&self, name: &str, file_name: &str, content: &str) -> Result<()> {
        let work = self.work_path(name);
        create_test_commit(&work, file_name, content, &format!("Add {file_name}"))?;
        git_output(&work, &["push", "-q", "origin", "HEAD"])?;
        Ok(())
    }

    /// Clones `name` into `dest_root` outside of the tool, with a local identity
    pub fn clone_into(&self, name: &str, dest_root: &Path) -> Result<PathBuf> {
        let dest = dest_root.join(name);
        git_output(
            dest_root,
            &["clone", "-q", self.bare_path(name).to_str().unwrap(), dest.to_str().unwrap()],
        )?;
        super::git::configure_identity(&dest)?;
        Ok(dest)
    }
}
