//! Organization repository listing over the GitHub REST API

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, LINK};
use thiserror::Error;

use super::pagination::next_page;
use super::types::RepositoryDescriptor;
use crate::core::config::{GITHUB_API_BASE, GITHUB_API_VERSION, REPOS_PER_PAGE, USER_AGENT};

/// Failure to list an organization; always fatal for the run
#[derive(Debug, Error)]
pub enum ListError {
    #[error("network error while listing {org}: {message}")]
    Network { org: String, message: String },

    #[error("GitHub rejected the token (401 Unauthorized), check GITHUB_TOKEN")]
    Unauthorized,

    #[error("access to organization {0} is forbidden (403), the token may lack scopes or be rate limited")]
    Forbidden(String),

    #[error("organization {0} not found (404)")]
    NotFound(String),

    #[error("GitHub returned HTTP {status} for {org}: {body}")]
    Http {
        org: String,
        status: u16,
        body: String,
    },

    #[error("could not decode repository list for {org}: {message}")]
    Decode { org: String, message: String },
}

/// Source of an organization's repository descriptors
#[async_trait]
pub trait RepoLister: Send + Sync {
    /// Returns every repository of `org`, fully materialized and in API order
    async fn list_org_repositories(&self, org: &str) -> Result<Vec<RepositoryDescriptor>, ListError>;
}

/// `RepoLister` backed by the GitHub REST API
pub struct GitHubClient {
    token: String,
    client: reqwest::Client,
    base_url: String,
}

impl GitHubClient {
    /// Creates a client for api.github.com
    pub fn new(token: impl Into<String>) -> Result<Self, ListError> {
        Self::with_base_url(token, GITHUB_API_BASE)
    }

    /// Creates a client for a custom API root (GitHub Enterprise or a test server)
    pub fn with_base_url(
        token: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, ListError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ListError::Network {
                org: String::new(),
                message: e.to_string(),
            })?;

        Ok(Self {
            token: token.into(),
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Fetches a single page; returns the descriptors and the next page number
    async fn fetch_page(
        &self,
        org: &str,
        page: u32,
    ) -> Result<(Vec<RepositoryDescriptor>, Option<u32>), ListError> {
        let url = format!("{}/orgs/{}/repos", self.base_url, org);
        tracing::debug!(org, page, "listing repositories");

        let response = self
            .client
            .get(&url)
            .query(&[("per_page", REPOS_PER_PAGE), ("page", page)])
            .header(ACCEPT, "application/vnd.github+json")
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
            .send()
            .await
            .map_err(|e| ListError::Network {
                org: org.to_string(),
                message: e.to_string(),
            })?;

        match response.status().as_u16() {
            200..=299 => {}
            401 => return Err(ListError::Unauthorized),
            403 => return Err(ListError::Forbidden(org.to_string())),
            404 => return Err(ListError::NotFound(org.to_string())),
            status => {
                let body = response.text().await.unwrap_or_default();
                return Err(ListError::Http {
                    org: org.to_string(),
                    status,
                    body,
                });
            }
        }

        let next = response
            .headers()
            .get(LINK)
            .and_then(|value| value.to_str().ok())
            .and_then(next_page);

        let repos: Vec<RepositoryDescriptor> =
            response.json().await.map_err(|e| ListError::Decode {
                org: org.to_string(),
                message: e.to_string(),
            })?;

        Ok((repos, next))
    }
}

#[async_trait]
impl RepoLister for GitHubClient {
    async fn list_org_repositories(&self, org: &str) -> Result<Vec<RepositoryDescriptor>, ListError> {
        let mut repos = Vec::new();
        let mut page = 1;

        loop {
            let (batch, next) = self.fetch_page(org, page).await?;
            repos.extend(batch);

            match next {
                // Guard against a server that keeps pointing at the same page
                Some(next) if next > page => page = next,
                _ => break,
            }
        }

        tracing::debug!(org, count = repos.len(), "listing complete");
        Ok(repos)
    }
}
