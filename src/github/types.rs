//! Repository metadata as returned by the GitHub API

use serde::Deserialize;
use std::collections::HashMap;

const PULL_PERMISSION: &str = "pull";

/// Metadata record for one remote repository
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RepositoryDescriptor {
    pub name: String,
    pub clone_url: String,
    #[serde(default)]
    pub default_branch: Option<String>,
    #[serde(default)]
    pub archived: bool,
    /// Capability name to granted flag; absent from the API response for
    /// unauthenticated requests, in which case nothing is granted
    #[serde(default)]
    pub permissions: HashMap<String, bool>,
}

impl RepositoryDescriptor {
    pub fn can_pull(&self) -> bool {
        self.permissions
            .get(PULL_PERMISSION)
            .copied()
            .unwrap_or(false)
    }
}
