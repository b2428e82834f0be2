//! HTTP client utilities
//!
//! Provides a reqwest::Client configured with timeouts. Proxies come from the
//! usual HTTP_PROXY / HTTPS_PROXY / NO_PROXY variables, which reqwest reads itself.

use crate::error::AppError;
use reqwest::Client;
use std::time::Duration;

/// Build a reqwest Client with the given overall request timeout
pub fn client_with_timeout(timeout: Duration) -> Result<Client, AppError> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .user_agent(concat!("oficios/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))
}
