use chrono::{Duration, TimeZone, Utc};
use normalizer::table::{read_commits, read_issues, write_commits, write_issues};
use normalizer::{normalize_issues, CommitRecord, IssueRecord, RawIssue, UserRef};
use tempfile::tempdir;

fn commits() -> Vec<CommitRecord> {
    vec![
        CommitRecord {
            sha: "sha1".into(),
            author: "Alice".into(),
            email: "a@example.com".into(),
            date: "2024-01-02T03:04:05+02:00".into(),
            message: "Initial commit\nDetails, with \"quotes\"".into(),
        },
        CommitRecord {
            sha: "sha2".into(),
            author: String::new(),
            email: String::new(),
            date: String::new(),
            message: "Bug fix".into(),
        },
    ]
}

fn issues() -> Vec<IssueRecord> {
    let created = Utc.with_ymd_and_hms(2024, 2, 1, 8, 30, 0).unwrap();
    let raw = vec![
        RawIssue {
            id: 11,
            number: 1,
            title: "Crash on start".into(),
            user: Some(UserRef {
                login: "alice".into(),
            }),
            state: "closed".into(),
            created_at: created,
            closed_at: Some(created + Duration::days(3) + Duration::hours(5)),
            comments: 2,
            pull_request: None,
        },
        RawIssue {
            id: 12,
            number: 2,
            title: "Docs, typo".into(),
            user: None,
            state: "open".into(),
            created_at: created,
            closed_at: None,
            comments: 0,
            pull_request: None,
        },
    ];
    normalize_issues(&raw, None)
}

#[test]
fn commits_survive_a_snapshot() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("commits.csv");
    let original = commits();
    write_commits(&path, &original).unwrap();
    assert_eq!(read_commits(&path).unwrap(), original);
}

#[test]
fn issues_survive_a_snapshot() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("issues.csv");
    let original = issues();
    write_issues(&path, &original).unwrap();

    let header = std::fs::read_to_string(&path).unwrap();
    assert!(header.starts_with(
        "id,number,title,user,state,created_at,closed_at,comments,open_duration_days\n"
    ));

    let reloaded = read_issues(&path).unwrap();
    assert_eq!(reloaded, original);
    assert_eq!(reloaded[0].open_duration_days, Some(3));
    assert_eq!(reloaded[1].closed_at, None);
    assert_eq!(reloaded[1].open_duration_days, None);
}

#[test]
fn issues_without_duration_column_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("issues.csv");
    std::fs::write(
        &path,
        "id,number,title,user,state,created_at,closed_at,comments\n\
         1,1,Bug,alice,closed,2024-01-01T00:00:00+00:00,2024-01-06T00:00:00+00:00,0\n",
    )
    .unwrap();
    let rows = read_issues(&path).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].open_duration_days, None);
    assert_eq!(rows[0].closed_at.as_deref(), Some("2024-01-06T00:00:00+00:00"));
}

#[test]
fn empty_issue_table_keeps_every_column() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("issues.csv");
    let rows = normalize_issues(&[], None);
    assert!(rows.is_empty());

    write_issues(&path, &rows).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        contents,
        "id,number,title,user,state,created_at,closed_at,comments,open_duration_days\n"
    );
    assert_eq!(IssueRecord::COLUMNS.len(), 9);
    assert!(read_issues(&path).unwrap().is_empty());
}

#[test]
fn malformed_cell_is_invalid_input() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("issues.csv");
    std::fs::write(
        &path,
        "id,number,title,user,state,created_at,closed_at,comments,open_duration_days\n\
         1,1,Bug,alice,closed,2024-01-01T00:00:00+00:00,2024-01-06T00:00:00+00:00,0,5.0\n",
    )
    .unwrap();
    let err = read_issues(&path).unwrap_err();
    assert!(matches!(err, common::AppError::InvalidInput(_)), "{err}");
}
