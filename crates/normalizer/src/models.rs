use serde::{Deserialize, Serialize};

/// One row of the commit table. Field order is the column order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommitRecord {
    pub sha: String,
    pub author: String,
    pub email: String,
    pub date: String,
    pub message: String,
}

impl CommitRecord {
    pub const COLUMNS: [&'static str; 5] = ["sha", "author", "email", "date", "message"];
}

/// One row of the issue table. Pull requests never become an `IssueRecord`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IssueRecord {
    pub id: i64,
    pub number: i64,
    pub title: String,
    pub user: String,
    pub state: String,
    pub created_at: String,
    pub closed_at: Option<String>,
    pub comments: i64,
    /// `Some` exactly when `closed_at` is `Some`.
    #[serde(default)]
    pub open_duration_days: Option<i64>,
}

impl IssueRecord {
    pub const COLUMNS: [&'static str; 9] = [
        "id",
        "number",
        "title",
        "user",
        "state",
        "created_at",
        "closed_at",
        "comments",
        "open_duration_days",
    ];

    pub fn is_closed(&self) -> bool {
        self.state == "closed"
    }
}
