//! User-facing failure taxonomy for the update workflow.

use thiserror::Error;

use crate::clients::ServiceError;
use crate::resolver::ScanResolutionError;

/// Failures the operator is told about.
///
/// The `Display` text names the failure in general terms; the payload keeps the detail for logs.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum WorkflowError {
    #[error("Could not reach the inventory service")]
    Network(String),

    #[error("The inventory service sent an unreadable response")]
    Decode(String),

    #[error("QR code is not valid or the product was not found")]
    ScanResolution(String),

    #[error("Still requesting camera permission")]
    PermissionPending,

    #[error("No permission to use the camera")]
    PermissionDenied,

    #[error("{0}")]
    Validation(String),
}

impl From<ServiceError> for WorkflowError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Decode(detail) => WorkflowError::Decode(detail),
            other => WorkflowError::Network(other.to_string()),
        }
    }
}

impl From<ScanResolutionError> for WorkflowError {
    fn from(e: ScanResolutionError) -> Self {
        WorkflowError::ScanResolution(e.to_string())
    }
}
