//! Statistics tracking for sync runs

use crate::core::config::{ERROR_MESSAGE_MAX_LENGTH, ERROR_MESSAGE_TRUNCATE_LENGTH, PATH_DISPLAY_WIDTH};
use crate::core::select::Action;
use crate::git::Status;
use std::time::Duration;

/// What happened to one repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoOutcome {
    pub name: String,
    pub path: String,
    /// `None` when the local copy could not be inspected
    pub action: Option<Action>,
    pub status: Status,
    pub message: String,
    /// Local changes were stashed before updating
    pub stashed: bool,
}

/// Aggregated results of a sync run
///
/// Only the coordinator mutates this, folding in outcomes as workers finish.
#[derive(Debug, Clone, Default)]
pub struct SyncStatistics {
    pub cloned_repos: u32,
    pub updated_repos: u32,
    pub skipped_repos: u32,
    pub no_permission_repos: u32,
    pub error_repos: u32,
    pub failed_repos: Vec<(String, String, String)>, // (repo_name, repo_path, error_message)
    pub stashed_repos: Vec<(String, String)>,        // (repo_name, repo_path)
}

impl SyncStatistics {
    /// Creates a new statistics tracker with all counters initialized to zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates statistics with a finished repository
    pub fn update(&mut self, outcome: &RepoOutcome) {
        match outcome.status {
            Status::Cloned => self.cloned_repos += 1,
            Status::Updated => self.updated_repos += 1,
            Status::Skip => self.skipped_repos += 1,
            Status::NoPermission => {
                self.skipped_repos += 1;
                self.no_permission_repos += 1;
            }
            Status::Error => {
                self.error_repos += 1;
                self.failed_repos.push((
                    outcome.name.clone(),
                    outcome.path.clone(),
                    outcome.message.clone(),
                ));
            }
        }

        // A stash that succeeded is worth reporting even if a later step failed
        if outcome.stashed && !self.stashed_repos.iter().any(|(name, _)| *name == outcome.name) {
            self.stashed_repos
                .push((outcome.name.clone(), outcome.path.clone()));
        }
    }

    /// Number of repositories that ended in a failure
    pub fn failures(&self) -> u32 {
        self.error_repos
    }

    /// Short progress line used while the run is still going
    pub fn progress_message(&self) -> String {
        format!(
            "{} cloned • {} updated • {} skipped • {} failed",
            self.cloned_repos, self.updated_repos, self.skipped_repos, self.error_repos
        )
    }

    /// Generates a summary string of the sync results
    pub fn generate_summary(&self, duration: Duration) -> String {
        let mut summary = format!(
            "✅ Completed in {:.1}s • {} cloned • {} updated • {} skipped",
            duration.as_secs_f64(),
            self.cloned_repos,
            self.updated_repos,
            self.skipped_repos
        );

        if self.no_permission_repos > 0 {
            summary.push_str(&format!(" ({} no access)", self.no_permission_repos));
        }
        if self.error_repos > 0 {
            summary.push_str(&format!(" • {} failed", self.error_repos));
        }
        summary
    }

    /// Generates detailed listings for repositories needing attention
    pub fn generate_detailed_summary(&self) -> String {
        let mut lines = Vec::new();

        // Failed repos get priority
        if !self.failed_repos.is_empty() {
            lines.push(format!("🔴 FAILED REPOS ({})", self.failed_repos.len()));
            for (i, (repo_name, repo_path, error)) in self.failed_repos.iter().enumerate() {
                let tree_char = tree_char(i, self.failed_repos.len());
                let short_path = crate::utils::shorten_path(repo_path, PATH_DISPLAY_WIDTH);
                lines.push(format!(
                    "   {} {:20} {:30} # {}",
                    tree_char, repo_name, short_path, error
                ));
            }
            lines.push(String::new());
        }

        if !self.stashed_repos.is_empty() {
            lines.push(format!("📦 STASHED CHANGES ({})", self.stashed_repos.len()));
            for (i, (repo_name, repo_path)) in self.stashed_repos.iter().enumerate() {
                let tree_char = tree_char(i, self.stashed_repos.len());
                let short_path = crate::utils::shorten_path(repo_path, PATH_DISPLAY_WIDTH);
                lines.push(format!(
                    "   {} {:20} {:30} # git stash pop",
                    tree_char, repo_name, short_path
                ));
            }
        }

        // Remove trailing blank line if it exists
        if lines.last() == Some(&String::new()) {
            lines.pop();
        }

        lines.join("\n")
    }
}

fn tree_char(index: usize, len: usize) -> &'static str {
    if index == len - 1 {
        "└─"
    } else {
        "├─"
    }
}

/// Cleans and formats error messages for display
pub(crate) fn clean_error_message(error: &str) -> String {
    // Replace newlines/tabs with spaces and collapse whitespace
    let cleaned = error.replace('\r', "");
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    // Extract key error patterns
    if cleaned.contains("timed out") {
        "timeout".to_string()
    } else if cleaned.contains("Authentication failed")
        || cleaned.contains("could not read Username")
        || cleaned.contains("Permission denied (publickey")
    {
        "authentication failed".to_string()
    } else if cleaned.contains("CONFLICT") || cleaned.contains("could not apply") {
        "rebase conflict".to_string()
    } else if cleaned.contains("Could not resolve host") || cleaned.contains("Connection") {
        "network error".to_string()
    } else if cleaned.chars().count() > ERROR_MESSAGE_MAX_LENGTH {
        let truncated: String = cleaned.chars().take(ERROR_MESSAGE_TRUNCATE_LENGTH).collect();
        format!("{truncated}...")
    } else {
        cleaned
    }
}
