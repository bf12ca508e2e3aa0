//! Submission delivery
//!
//! Forms and confirmed links end in a [`Submission`]. The view never talks
//! to the server directly; it hands submissions to a [`SubmissionSink`].

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
}

/// One form post or link navigation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub method: Method,
    pub action: String,
    #[serde(default)]
    pub fields: Vec<(String, String)>,
}

impl Submission {
    pub fn post(action: impl Into<String>, fields: Vec<(String, String)>) -> Self {
        Self {
            method: Method::Post,
            action: action.into(),
            fields,
        }
    }

    pub fn get(action: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            action: action.into(),
            fields: Vec::new(),
        }
    }
}

/// Where submissions go
pub trait SubmissionSink {
    fn submit(&mut self, submission: &Submission) -> Result<()>;
}

/// One outbox line: a submission and when it was made
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboxEntry {
    pub timestamp: DateTime<Local>,
    #[serde(flatten)]
    pub submission: Submission,
}

/// Appends each submission as one JSON line
#[derive(Debug, Clone)]
pub struct JsonlOutbox {
    path: PathBuf,
}

impl JsonlOutbox {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read back every entry in the outbox, oldest first
    pub fn read_all(&self) -> Result<Vec<OutboxEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read outbox {}", self.path.display()))?;
        contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .enumerate()
            .map(|(n, line)| {
                serde_json::from_str(line)
                    .with_context(|| format!("Bad outbox line {} in {}", n + 1, self.path.display()))
            })
            .collect()
    }
}

impl SubmissionSink for JsonlOutbox {
    fn submit(&mut self, submission: &Submission) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let entry = OutboxEntry {
            timestamp: Local::now(),
            submission: submission.clone(),
        };
        let line = serde_json::to_string(&entry)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open outbox {}", self.path.display()))?;
        writeln!(file, "{}", line)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_outbox_appends_lines() {
        let dir = TempDir::new().unwrap();
        let mut outbox = JsonlOutbox::new(dir.path().join("nested").join("outbox.jsonl"));

        let post = Submission::post(
            "/update_return_status/2",
            vec![("status".into(), "processed".into())],
        );
        outbox.submit(&post).unwrap();
        outbox.submit(&Submission::get("/delete_item/7")).unwrap();

        let contents = fs::read_to_string(outbox.path()).unwrap();
        assert_eq!(contents.lines().count(), 2);
        assert!(contents.contains(r#""method":"POST""#));
        assert!(contents.contains("timestamp"));

        let read: Vec<Submission> = outbox
            .read_all()
            .unwrap()
            .into_iter()
            .map(|entry| entry.submission)
            .collect();
        assert_eq!(read, vec![post, Submission::get("/delete_item/7")]);
    }

    #[test]
    fn test_read_all_missing_file() {
        let dir = TempDir::new().unwrap();
        let outbox = JsonlOutbox::new(dir.path().join("none.jsonl"));
        assert!(outbox.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_read_all_reports_bad_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("outbox.jsonl");
        fs::write(&path, "{not json}\n").unwrap();
        let err = JsonlOutbox::new(&path).read_all().unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }
}
