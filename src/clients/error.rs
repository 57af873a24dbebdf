//! Error types for the remote inventory service client.

use thiserror::Error;

/// Failures reported by an [`InventoryService`](super::InventoryService).
///
/// The client never retries; each failure is surfaced as-is and the caller decides policy.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ServiceError {
    /// Transport failure, or a non-success status where no finer variant applies.
    #[error("Network error: {0}")]
    Network(String),

    /// The product endpoint answered with a non-success status.
    #[error("Product not found (HTTP {status})")]
    NotFound { status: u16 },

    /// The response body could not be parsed.
    #[error("Malformed response: {0}")]
    Decode(String),

    /// The service refused an update.
    #[error("Update rejected by server (HTTP {status})")]
    Rejected { status: u16 },
}

impl From<reqwest::Error> for ServiceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ServiceError::Decode(e.to_string())
        } else {
            ServiceError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(e: serde_json::Error) -> Self {
        ServiceError::Decode(e.to_string())
    }
}
