//! Raw GitHub REST shapes, decoded once at the boundary.
//!
//! Only the fields the normalizers read are declared; everything else in the
//! response is ignored by serde.

use chrono::{DateTime, FixedOffset, Utc};
use serde::Deserialize;

/// An item of `GET /repos/{owner}/{repo}/commits`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCommit {
    pub sha: String,
    pub commit: RawCommitDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCommitDetail {
    #[serde(default)]
    pub author: Option<GitActor>,
    #[serde(default)]
    pub message: String,
}

/// Git-level author identity, not the linked GitHub account.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitActor {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub date: Option<DateTime<FixedOffset>>,
}

/// An item of `GET /repos/{owner}/{repo}/issues`, which also lists pull requests.
#[derive(Debug, Clone, Deserialize)]
pub struct RawIssue {
    pub id: i64,
    pub number: i64,
    pub title: String,
    #[serde(default)]
    pub user: Option<UserRef>,
    pub state: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub comments: i64,
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
}

impl RawIssue {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserRef {
    pub login: String,
}
