//! Per-repository outcome status and display helpers

/// Final status of one repository in a sync run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    /// Repository was cloned fresh
    Cloned,
    /// Existing working copy was brought up to date
    Updated,
    /// Repository was intentionally left alone (filtered, archived, empty, ...)
    Skip,
    /// Repository was skipped because the token cannot pull it
    NoPermission,
    /// A git operation failed for this repository
    Error,
}

impl Status {
    /// Returns the emoji symbol for this status
    pub fn symbol(&self) -> &str {
        match self {
            Status::Cloned | Status::Updated => "🟢",
            Status::Skip => "🟠",
            Status::NoPermission => "🟡",
            Status::Error => "🔴",
        }
    }

    /// Returns the text representation of this status
    pub fn text(&self) -> &str {
        match self {
            Status::Cloned => "cloned",
            Status::Updated => "updated",
            Status::Skip => "skip",
            Status::NoPermission => "no-access",
            Status::Error => "failed",
        }
    }
}
