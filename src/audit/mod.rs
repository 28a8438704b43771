//! Audit logging
//!
//! Appends one line per completed operation to a durable append-only file
//! and mirrors the same line to the process log. The sink handle is shared
//! across requests behind a mutex so concurrent appends keep completion
//! order.

use chrono::Utc;
use log::{info, warn};
use std::path::Path;
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

pub struct AuditLogger {
    sink: Mutex<File>,
}

impl AuditLogger {
    /// Opens the append-only audit sink, creating the log directory and
    /// file if they do not exist yet.
    pub async fn open(log_file: &Path) -> std::io::Result<Self> {
        if let Some(parent) = log_file.parent() {
            fs::create_dir_all(parent).await?;
        }

        let sink = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)
            .await?;

        Ok(Self {
            sink: Mutex::new(sink),
        })
    }

    /// Records a completed operation.
    ///
    /// Best-effort: a failure to append is logged and swallowed, it never
    /// fails the request that produced the record.
    pub async fn record(&self, method: &str, request_path: &str) {
        let line = format!(
            "[{}] {} {}",
            Utc::now().format("%Y-%m-%d %H:%M:%SZ"),
            method,
            request_path
        );

        let mut sink = self.sink.lock().await;
        if let Err(e) = sink.write_all(format!("{}\n", line).as_bytes()).await {
            warn!("Failed to append audit record: {}", e);
        }
        drop(sink);

        info!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn open_creates_log_directory() {
        let dir = TempDir::new().unwrap();
        let log_file = dir.path().join("Logs").join("log.txt");

        AuditLogger::open(&log_file).await.unwrap();
        assert!(log_file.exists());
    }

    #[tokio::test]
    async fn record_appends_one_line_per_operation() {
        let dir = TempDir::new().unwrap();
        let log_file = dir.path().join("log.txt");

        let audit = AuditLogger::open(&log_file).await.unwrap();
        audit.record("PUT", "docs/a.txt").await;
        audit.record("DELETE-FILE", "docs/a.txt").await;

        let contents = fs::read_to_string(&log_file).await.unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].ends_with("PUT docs/a.txt"));
        assert!(lines[1].ends_with("DELETE-FILE docs/a.txt"));
    }

    #[tokio::test]
    async fn reopening_appends_instead_of_truncating() {
        let dir = TempDir::new().unwrap();
        let log_file = dir.path().join("log.txt");

        let audit = AuditLogger::open(&log_file).await.unwrap();
        audit.record("PUT", "a.txt").await;
        drop(audit);

        let audit = AuditLogger::open(&log_file).await.unwrap();
        audit.record("GET", "a.txt").await;

        let contents = fs::read_to_string(&log_file).await.unwrap();
        assert_eq!(contents.lines().count(), 2);
    }
}
