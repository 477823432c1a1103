//! Action selection: what to do with one repository

use std::fmt;

use super::config::FilterConfig;
use crate::git::LocalState;
use crate::github::RepositoryDescriptor;

/// Why a repository is not being cloned or updated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Archived,
    NoPullPermission,
    NotIncluded,
    Excluded,
    EmptyRepo,
}

impl SkipReason {
    pub fn message(&self) -> &'static str {
        match self {
            SkipReason::Archived => "archived",
            SkipReason::NoPullPermission => "no pull permission",
            SkipReason::NotIncluded => "filtered-out by include",
            SkipReason::Excluded => "filtered-out by exclude",
            SkipReason::EmptyRepo => "empty, nothing to update",
        }
    }

    /// Permission skips are surfaced as warnings, everything else is informational
    pub fn is_warning(&self) -> bool {
        matches!(self, SkipReason::NoPullPermission)
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Resolved action for one repository
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Skip(SkipReason),
    Clone,
    Update { needs_stash: bool },
}

impl Action {
    pub fn is_skip(&self) -> bool {
        matches!(self, Action::Skip(_))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Skip(reason) => write!(f, "skip ({reason})"),
            Action::Clone => f.write_str("clone"),
            Action::Update { needs_stash: true } => f.write_str("stash and update"),
            Action::Update { needs_stash: false } => f.write_str("update"),
        }
    }
}

/// Descriptor-only filters, checked before anything touches the filesystem
pub fn prefilter(repo: &RepositoryDescriptor, filter: &FilterConfig) -> Option<SkipReason> {
    if repo.archived && filter.skip_archived() {
        return Some(SkipReason::Archived);
    }
    if !repo.can_pull() {
        return Some(SkipReason::NoPullPermission);
    }
    if let Some(include) = filter.include() {
        if !repo.name.contains(include) {
            return Some(SkipReason::NotIncluded);
        }
    }
    if let Some(exclude) = filter.exclude() {
        if repo.name.contains(exclude) {
            return Some(SkipReason::Excluded);
        }
    }
    None
}

/// Picks the action for a repository; the first matching rule wins
pub fn select_action(
    repo: &RepositoryDescriptor,
    state: LocalState,
    filter: &FilterConfig,
) -> Action {
    if let Some(reason) = prefilter(repo, filter) {
        return Action::Skip(reason);
    }

    match state {
        LocalState::Absent => Action::Clone,
        LocalState::EmptyRepo => Action::Skip(SkipReason::EmptyRepo),
        LocalState::CleanRepo => Action::Update { needs_stash: false },
        LocalState::DirtyRepo => Action::Update { needs_stash: true },
    }
}
