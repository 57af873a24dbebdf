//! Inputs to the workflow and the outbound work it requests.

use crate::clients::ServiceError;
use crate::model::{PermissionState, StockUpdate, User, UserId};
use crate::resolver::{Resolution, ScanResolutionError};

/// Everything the workflow reacts to.
#[derive(Debug)]
pub enum WorkflowEvent {
    // --- Operator input ---
    HighlightUser(Option<UserId>),
    ConfirmUser,
    OpenScanner,
    CloseScanner,
    /// Decoded text from the camera.
    Scanned(String),
    DecrementQuantity,
    IncrementQuantity,
    EnterQuantity(String),
    RequestConfirm,
    CancelReview,
    Commit,
    DeclineCommit,
    /// Dismiss the oldest notice.
    Acknowledge,

    // --- Effect completions ---
    UsersLoaded(Result<Vec<User>, ServiceError>),
    PermissionSettled(PermissionState),
    ScanResolved {
        generation: u64,
        outcome: Result<Resolution, ScanResolutionError>,
    },
    CommitFinished {
        generation: u64,
        outcome: Result<(), ServiceError>,
    },
}

impl WorkflowEvent {
    /// Whether the event comes from the operator rather than from a completed effect.
    pub fn is_operator_input(&self) -> bool {
        !matches!(
            self,
            WorkflowEvent::UsersLoaded(_)
                | WorkflowEvent::PermissionSettled(_)
                | WorkflowEvent::ScanResolved { .. }
                | WorkflowEvent::CommitFinished { .. }
        )
    }
}

/// Work the workflow asks the actor to perform.
///
/// `Resolve` and `Commit` carry the generation they were issued under.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    LoadUsers,
    RequestPermission,
    Resolve {
        generation: u64,
        payload: String,
        users: Vec<User>,
    },
    Commit {
        generation: u64,
        update: StockUpdate,
    },
}
