//! Professional-record store
//!
//! The search pipeline only ever reads from here: one call per query
//! returning every eligible professional.

pub mod file;
pub mod seed;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use file::JsonFileStore;
pub use seed::MemoryStore;

/// A tradesperson profile as stored by the marketplace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Professional {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub categories: Vec<u32>,
    #[serde(default)]
    pub avg_rating: f64,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub photo_url: Option<String>,
    /// WhatsApp contact number
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub subscription_active: bool,
}

impl Professional {
    /// Only active profiles with a paid subscription are searchable
    pub fn is_eligible(&self) -> bool {
        self.active && self.subscription_active
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed professional data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read side of the professional-profile store
#[async_trait]
pub trait ProfessionalStore: Send + Sync {
    /// All professionals with both the active and subscription-active flags set
    async fn eligible_professionals(&self) -> Result<Vec<Professional>, StoreError>;
}
