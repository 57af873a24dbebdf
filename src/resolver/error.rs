//! Error types for scan resolution.

use thiserror::Error;

use crate::clients::ServiceError;

/// Reasons decoded scan text could not be turned into a product or user.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ScanResolutionError {
    /// The payload is not a usable endpoint.
    #[error("Scanned text is not an endpoint: {0}")]
    InvalidPayload(String),

    /// The endpoint could not be fetched or decoded.
    #[error("Product lookup failed: {0}")]
    Lookup(#[from] ServiceError),

    /// No loaded user matches the payload.
    #[error("No user matches {0:?}")]
    UnknownIdentity(String),
}
