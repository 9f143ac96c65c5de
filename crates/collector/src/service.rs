use common::Result;
use normalizer::{normalize_commits, normalize_issues, CommitRecord, IssueRecord, Limit};
use tracing::{info, instrument};

use crate::source::{IssueState, RepoSlug, SharedSource};

/// Fetches raw listings and turns them into normalized tables.
///
/// Each call is all-or-nothing: a data source failure returns the error and
/// no rows.
pub struct Miner {
    source: SharedSource,
}

impl Miner {
    pub fn new(source: SharedSource) -> Self {
        Self { source }
    }

    #[instrument(skip(self, repo), fields(repo = %repo))]
    pub async fn fetch_commits(
        &self,
        repo: &RepoSlug,
        max: Option<Limit>,
    ) -> Result<Vec<CommitRecord>> {
        let raw = self.source.list_commits(repo, max).await?;
        let records = normalize_commits(&raw, max);
        info!(rows = records.len(), "fetched commits");
        Ok(records)
    }

    #[instrument(skip(self, repo, state), fields(repo = %repo, state = state.as_str()))]
    pub async fn fetch_issues(
        &self,
        repo: &RepoSlug,
        state: IssueState,
        max: Option<Limit>,
    ) -> Result<Vec<IssueRecord>> {
        let raw = self.source.list_issues(repo, state, max).await?;
        let records = normalize_issues(&raw, max);
        info!(raw = raw.len(), rows = records.len(), "fetched issues");
        Ok(records)
    }
}
