pub mod limit;
pub mod models;
pub mod payloads;
pub mod table;
pub mod transform;

pub use limit::Limit;
pub use models::{CommitRecord, IssueRecord};
pub use payloads::{GitActor, RawCommit, RawCommitDetail, RawIssue, UserRef};
pub use transform::{
    normalize_commit, normalize_commits, normalize_issue, normalize_issues, open_duration_days,
};
