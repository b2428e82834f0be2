//! JSON-file backed professional store
//!
//! The file holds an array of professional documents. It is re-read on every
//! query so profile edits made by other processes show up without a restart.

use super::{Professional, ProfessionalStore, StoreError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ProfessionalStore for JsonFileStore {
    async fn eligible_professionals(&self) -> Result<Vec<Professional>, StoreError> {
        let data = tokio::fs::read_to_string(&self.path).await?;
        let all: Vec<Professional> = serde_json::from_str(&data)?;
        let total = all.len();

        let eligible: Vec<Professional> = all.into_iter().filter(Professional::is_eligible).collect();
        debug!(
            "Loaded {} professionals from {} ({} eligible)",
            total,
            self.path.display(),
            eligible.len()
        );

        Ok(eligible)
    }
}
