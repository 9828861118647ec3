//! Append-only audit log of terminal job outcomes.
//!
//! The audit log is a non-authoritative mirror of the job store. Appends
//! are best-effort: the worker reports failures through tracing and never
//! lets them touch the job's terminal record.

use std::path::PathBuf;

use async_trait::async_trait;
use relay_core::TaskRecord;
use thiserror::Error;
use tokio::io::AsyncWriteExt;

/// Audit persistence errors. Always non-fatal for the job.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("audit write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("audit serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Durable history of terminal job records, one document per job.
#[async_trait]
pub trait AuditLog: Send + Sync {
    async fn append(&self, record: &TaskRecord) -> Result<(), AuditError>;
}

/// File-backed audit log, one JSON document per line.
pub struct JsonlAuditLog {
    path: PathBuf,
}

impl JsonlAuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl AuditLog for JsonlAuditLog {
    async fn append(&self, record: &TaskRecord) -> Result<(), AuditError> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        Ok(())
    }
}
