use std::collections::HashMap;

use chrono::{DateTime, Utc};
use normalizer::{open_duration_days, CommitRecord, IssueRecord};
use serde::Serialize;
use tracing::debug;

use crate::timestamps::parse_timestamp;

/// Stand-in for commits whose author name is missing or blank.
pub const UNKNOWN_AUTHOR: &str = "<unknown>";

pub const TOP_COMMITTERS: usize = 5;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CommitterCount {
    pub author: String,
    pub commits: usize,
}

/// Oldest and newest parseable commit dates.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct CommitSpan {
    pub first: DateTime<Utc>,
    pub last: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SummaryResult {
    pub total_commits: usize,
    pub commit_span: Option<CommitSpan>,
    /// Count descending; equal counts keep the order authors first appear in.
    pub top_committers: Vec<CommitterCount>,
    pub total_issues: usize,
    pub closed_issues: usize,
    pub close_rate: Option<f64>,
    pub avg_open_days: Option<f64>,
}

/// Derives the summary from two normalized tables without touching them.
pub fn summarize(commits: &[CommitRecord], issues: &[IssueRecord]) -> SummaryResult {
    let total_issues = issues.len();
    let closed_issues = issues.iter().filter(|issue| issue.is_closed()).count();
    let close_rate = (total_issues > 0).then(|| closed_issues as f64 / total_issues as f64);

    let summary = SummaryResult {
        total_commits: commits.len(),
        commit_span: commit_span(commits),
        top_committers: top_committers(commits, TOP_COMMITTERS),
        total_issues,
        closed_issues,
        close_rate,
        avg_open_days: average_open_days(issues),
    };
    debug!(
        commits = summary.total_commits,
        issues = summary.total_issues,
        closed = summary.closed_issues,
        "summarized tables"
    );
    summary
}

fn author_key(author: &str) -> &str {
    if author.trim().is_empty() {
        UNKNOWN_AUTHOR
    } else {
        author
    }
}

fn top_committers(commits: &[CommitRecord], limit: usize) -> Vec<CommitterCount> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<CommitterCount> = Vec::new();

    for commit in commits {
        let author = author_key(&commit.author);
        match slots.get(author) {
            Some(&slot) => counts[slot].commits += 1,
            None => {
                slots.insert(author, counts.len());
                counts.push(CommitterCount {
                    author: author.to_string(),
                    commits: 1,
                });
            }
        }
    }

    // sort_by is stable, so first-seen order breaks ties
    counts.sort_by(|a, b| b.commits.cmp(&a.commits));
    counts.truncate(limit);
    counts
}

fn commit_span(commits: &[CommitRecord]) -> Option<CommitSpan> {
    let mut dates = commits.iter().filter_map(|c| parse_timestamp(&c.date));
    let first = dates.next()?;
    let (first, last) = dates.fold((first, first), |(lo, hi), date| (lo.min(date), hi.max(date)));
    Some(CommitSpan { first, last })
}

/// Uses the precomputed durations when any exist, else derives them from
/// the timestamps of rows where both parse.
fn average_open_days(issues: &[IssueRecord]) -> Option<f64> {
    let precomputed: Vec<i64> = issues
        .iter()
        .filter_map(|issue| issue.open_duration_days)
        .collect();
    if !precomputed.is_empty() {
        return mean(&precomputed);
    }

    let derived: Vec<i64> = issues
        .iter()
        .filter_map(|issue| {
            let created = parse_timestamp(&issue.created_at)?;
            let closed = parse_timestamp(issue.closed_at.as_deref()?)?;
            open_duration_days(created, Some(closed))
        })
        .collect();
    mean(&derived)
}

fn mean(values: &[i64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<i64>() as f64 / values.len() as f64)
}
