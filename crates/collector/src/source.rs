use std::fmt;
use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use clap::ValueEnum;
use common::config::GithubConfig;
use common::{AppError, Result};
use normalizer::{Limit, RawCommit, RawIssue};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::client::{GithubClient, HttpGithubClient};

/// A repository named as `owner/name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    pub owner: String,
    pub name: String,
}

impl FromStr for RepoSlug {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        let malformed =
            || AppError::invalid_config(format!("repository must be owner/repo, got {s:?}"));
        let (owner, name) = s.trim().split_once('/').ok_or_else(malformed)?;
        let valid = |part: &str| {
            !part.is_empty()
                && part
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        };
        if !valid(owner) || !valid(name) {
            return Err(malformed());
        }
        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum IssueState {
    #[default]
    All,
    Open,
    Closed,
}

impl IssueState {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueState::All => "all",
            IssueState::Open => "open",
            IssueState::Closed => "closed",
        }
    }
}

/// The two queries the miner needs from a hosted repository.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Most recent first. `max` caps the commits returned.
    async fn list_commits(&self, repo: &RepoSlug, max: Option<Limit>) -> Result<Vec<RawCommit>>;

    /// Filtered by `state`. `max` caps raw items, pull requests included.
    async fn list_issues(
        &self,
        repo: &RepoSlug,
        state: IssueState,
        max: Option<Limit>,
    ) -> Result<Vec<RawIssue>>;
}

pub type SharedSource = Arc<dyn DataSource>;

pub struct RestDataSource {
    client: Arc<dyn GithubClient>,
    per_page: u32,
}

impl RestDataSource {
    pub fn new(client: Arc<dyn GithubClient>, per_page: u32) -> Self {
        Self {
            client,
            per_page: per_page.clamp(1, 100),
        }
    }

    pub fn from_config(config: &GithubConfig) -> Result<Self> {
        let client = HttpGithubClient::from_config(config)?;
        Ok(Self::new(Arc::new(client), config.page_size()))
    }

    /// Walks pages in order until a short page or the cap. Any failed page
    /// fails the whole listing.
    async fn collect_pages<T, F, Fut>(
        &self,
        op: &'static str,
        max: Option<Limit>,
        mut fetch: F,
    ) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Send,
        F: FnMut(u32, u32) -> Fut + Send,
        Fut: Future<Output = anyhow::Result<Vec<Value>>> + Send,
    {
        let mut items = Vec::new();
        let mut page = 1u32;
        while !Limit::reached(max, items.len()) {
            let values = fetch(page, self.per_page)
                .await
                .map_err(AppError::data_source)?;
            let fetched = values.len();
            for value in values {
                if Limit::reached(max, items.len()) {
                    break;
                }
                items.push(serde_json::from_value(value).map_err(AppError::data_source)?);
            }
            debug!(op, page, fetched, total = items.len(), "fetched page");
            if fetched < self.per_page as usize {
                break;
            }
            page += 1;
        }
        Ok(items)
    }
}

#[async_trait]
impl DataSource for RestDataSource {
    async fn list_commits(&self, repo: &RepoSlug, max: Option<Limit>) -> Result<Vec<RawCommit>> {
        let client = &self.client;
        self.collect_pages("commits", max, move |page, per_page| {
            client.list_commits(&repo.owner, &repo.name, page, per_page)
        })
        .await
    }

    async fn list_issues(
        &self,
        repo: &RepoSlug,
        state: IssueState,
        max: Option<Limit>,
    ) -> Result<Vec<RawIssue>> {
        let client = &self.client;
        self.collect_pages("issues", max, move |page, per_page| {
            client.list_issues(&repo.owner, &repo.name, state.as_str(), page, per_page)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_owner_and_name() {
        let slug: RepoSlug = "octocat/Hello-World".parse().unwrap();
        assert_eq!(slug.owner, "octocat");
        assert_eq!(slug.name, "Hello-World");
        assert_eq!(slug.to_string(), "octocat/Hello-World");
    }

    #[test]
    fn rejects_malformed_slugs() {
        for bad in ["", "octocat", "/repo", "owner/", "a/b/c", "own er/repo"] {
            let err = bad.parse::<RepoSlug>().unwrap_err();
            assert!(err.is_configuration(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn state_strings_match_api() {
        assert_eq!(IssueState::default().as_str(), "all");
        assert_eq!(IssueState::Open.as_str(), "open");
        assert_eq!(IssueState::Closed.as_str(), "closed");
    }
}
