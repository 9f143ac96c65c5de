use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::limit::Limit;
use crate::models::{CommitRecord, IssueRecord};
use crate::payloads::{RawCommit, RawIssue};

pub fn normalize_commit(raw: &RawCommit) -> CommitRecord {
    let author = raw.commit.author.clone().unwrap_or_default();
    CommitRecord {
        sha: raw.sha.clone(),
        author: author.name.unwrap_or_default(),
        email: author.email.unwrap_or_default(),
        date: author.date.map(|d| d.to_rfc3339()).unwrap_or_default(),
        message: raw.commit.message.clone(),
    }
}

/// Keeps source order; never drops a commit except past `max`.
pub fn normalize_commits(raw: &[RawCommit], max: Option<Limit>) -> Vec<CommitRecord> {
    let records: Vec<CommitRecord> = Limit::cap(max, raw).iter().map(normalize_commit).collect();
    debug!(raw = raw.len(), rows = records.len(), "normalized commits");
    records
}

pub fn normalize_issue(raw: &RawIssue) -> IssueRecord {
    IssueRecord {
        id: raw.id,
        number: raw.number,
        title: raw.title.clone(),
        user: raw
            .user
            .as_ref()
            .map(|u| u.login.clone())
            .unwrap_or_default(),
        state: raw.state.clone(),
        created_at: raw.created_at.to_rfc3339(),
        closed_at: raw.closed_at.map(|d| d.to_rfc3339()),
        comments: raw.comments,
        open_duration_days: open_duration_days(raw.created_at, raw.closed_at),
    }
}

/// `max` caps raw items, so pull requests inside the window still use up slots.
pub fn normalize_issues(raw: &[RawIssue], max: Option<Limit>) -> Vec<IssueRecord> {
    let window = Limit::cap(max, raw);
    let records: Vec<IssueRecord> = window
        .iter()
        .filter(|issue| !issue.is_pull_request())
        .map(normalize_issue)
        .collect();
    debug!(
        raw = raw.len(),
        pull_requests = window.len() - records.len(),
        rows = records.len(),
        "normalized issues"
    );
    records
}

/// Whole days from creation to closure, floored. Open issues have no duration.
pub fn open_duration_days(
    created_at: DateTime<Utc>,
    closed_at: Option<DateTime<Utc>>,
) -> Option<i64> {
    let span = closed_at? - created_at;
    let days = span.num_days();
    // num_days truncates toward zero; step down for negative remainders
    if span < Duration::days(days) {
        Some(days - 1)
    } else {
        Some(days)
    }
}
