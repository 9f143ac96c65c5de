//! Flat CSV snapshots of normalized tables.
//!
//! The header row is always written, even for an empty table, and lists the
//! columns in record order. Nulls are empty fields.

use std::path::Path;

use common::{AppError, Result};
use csv::{ReaderBuilder, WriterBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::models::{CommitRecord, IssueRecord};

pub trait TableRecord: Serialize + DeserializeOwned {
    const KIND: &'static str;

    fn columns() -> &'static [&'static str];

    /// Columns a reader may find missing; they deserialize to their default.
    fn optional_columns() -> &'static [&'static str] {
        &[]
    }
}

impl TableRecord for CommitRecord {
    const KIND: &'static str = "commits";

    fn columns() -> &'static [&'static str] {
        &Self::COLUMNS
    }
}

impl TableRecord for IssueRecord {
    const KIND: &'static str = "issues";

    fn columns() -> &'static [&'static str] {
        &Self::COLUMNS
    }

    fn optional_columns() -> &'static [&'static str] {
        &["open_duration_days"]
    }
}

pub fn write_commits(path: impl AsRef<Path>, rows: &[CommitRecord]) -> Result<()> {
    write_table(path.as_ref(), rows)
}

pub fn read_commits(path: impl AsRef<Path>) -> Result<Vec<CommitRecord>> {
    read_table(path.as_ref())
}

pub fn write_issues(path: impl AsRef<Path>, rows: &[IssueRecord]) -> Result<()> {
    write_table(path.as_ref(), rows)
}

pub fn read_issues(path: impl AsRef<Path>) -> Result<Vec<IssueRecord>> {
    read_table(path.as_ref())
}

pub fn write_table<R: TableRecord>(path: &Path, rows: &[R]) -> Result<()> {
    ensure_path(path)?;
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(AppError::io)?;
    writer.write_record(R::columns()).map_err(AppError::io)?;
    for row in rows {
        writer.serialize(row).map_err(AppError::io)?;
    }
    writer.flush().map_err(AppError::io)?;
    debug!(kind = R::KIND, rows = rows.len(), path = %path.display(), "wrote table");
    Ok(())
}

pub fn read_table<R: TableRecord>(path: &Path) -> Result<Vec<R>> {
    ensure_path(path)?;
    if !path.is_file() {
        return Err(AppError::invalid_input(format!(
            "{} file not found: {}",
            R::KIND,
            path.display()
        )));
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(AppError::io)?;
    let headers = reader.headers().map_err(AppError::io)?.clone();
    let missing: Vec<&str> = R::columns()
        .iter()
        .copied()
        .filter(|column| !R::optional_columns().contains(column))
        .filter(|column| !headers.iter().any(|h| h == *column))
        .collect();
    if !missing.is_empty() {
        return Err(AppError::invalid_input(format!(
            "{} is missing {} column(s): {}",
            path.display(),
            R::KIND,
            missing.join(", ")
        )));
    }

    let rows = reader
        .deserialize()
        .collect::<Result<Vec<R>, csv::Error>>()
        .map_err(|err| read_error(path, err))?;
    debug!(kind = R::KIND, rows = rows.len(), path = %path.display(), "read table");
    Ok(rows)
}

/// A cell that does not fit its column is bad input; anything else is I/O.
fn read_error(path: &Path, err: csv::Error) -> AppError {
    match err.kind() {
        csv::ErrorKind::Deserialize { .. } => {
            AppError::invalid_input(format!("{}: {err}", path.display()))
        }
        _ => AppError::io(err),
    }
}

fn ensure_path(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(AppError::invalid_input("path must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn empty_path_is_rejected() {
        let err = read_commits("").unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        let err = write_issues("", &[]).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn missing_file_is_rejected() {
        let dir = tempdir().unwrap();
        let err = read_issues(dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn empty_table_keeps_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("commits.csv");
        write_commits(&path, &[]).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.trim_end(), "sha,author,email,date,message");
        assert!(read_commits(&path).unwrap().is_empty());
    }

    #[test]
    fn missing_required_column_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("commits.csv");
        std::fs::write(&path, "sha,author,date\nabc,Alice,2024-01-01\n").unwrap();
        let err = read_commits(&path).unwrap_err();
        assert!(err.to_string().contains("email, message"));
    }
}
