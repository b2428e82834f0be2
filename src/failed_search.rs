//! Failed-search logging
//!
//! Queries that return nothing are appended to a write-only sink for later
//! demand analysis. Writes run on a detached task and never fail a search.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::store::StoreError;

/// Shortest trimmed query worth recording
pub const MIN_LOGGED_QUERY_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailedSearchStatus {
    Pending,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedSearch {
    pub term: String,
    pub timestamp: DateTime<Utc>,
    pub status: FailedSearchStatus,
}

impl FailedSearch {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            timestamp: Utc::now(),
            status: FailedSearchStatus::Pending,
        }
    }
}

/// Append-only destination for failed-search records
#[async_trait]
pub trait FailedSearchSink: Send + Sync {
    async fn append(&self, record: &FailedSearch) -> Result<(), StoreError>;
}

/// One JSON object per line
pub struct JsonLinesSink {
    path: PathBuf,
}

impl JsonLinesSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl FailedSearchSink for JsonLinesSink {
    async fn append(&self, record: &FailedSearch) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        // Single write on an O_APPEND handle keeps concurrent lines whole
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }
}

/// Decides whether a query is logged and performs the write off the request path
#[derive(Clone)]
pub struct FailedSearchLogger {
    sink: Arc<dyn FailedSearchSink>,
}

impl FailedSearchLogger {
    pub fn new(sink: Arc<dyn FailedSearchSink>) -> Self {
        Self { sink }
    }

    pub fn should_log(term: &str) -> bool {
        term.trim().chars().count() >= MIN_LOGGED_QUERY_LEN
    }

    /// Schedule a record for `term`. Returns the write task, or None when the
    /// term is too short to record. Must be called inside a tokio runtime.
    pub fn log(&self, term: &str) -> Option<JoinHandle<()>> {
        if !Self::should_log(term) {
            debug!("Not recording failed search {:?}: below minimum length", term);
            return None;
        }

        let record = FailedSearch::new(term.trim());
        let sink = Arc::clone(&self.sink);
        Some(tokio::spawn(async move {
            match sink.append(&record).await {
                Ok(()) => debug!("Recorded failed search {:?}", record.term),
                Err(e) => warn!("Failed to record failed search {:?}: {}", record.term, e),
            }
        }))
    }
}
