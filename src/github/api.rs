//! Public API for the GitHub module.
//!
//! Only listing is exposed: the rest of the crate sees an organization as a
//! sequence of [`RepositoryDescriptor`] values obtained through [`RepoLister`].

pub use super::client::{GitHubClient, ListError, RepoLister};
pub use super::types::RepositoryDescriptor;
