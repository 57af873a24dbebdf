//! Screens, notices and the published view of the workflow.

use std::fmt;

use crate::model::{PendingEdit, PermissionState, User, UserId};

use super::error::WorkflowError;

/// The screen the operator is on, with the data that screen owns.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Screen {
    /// Waiting for the user list and the camera permission.
    #[default]
    Loading,
    /// Startup failed; terminal for the session.
    Error { message: String },
    UserSelect {
        users: Vec<User>,
        highlighted: Option<UserId>,
    },
    ScanReady { operator: User },
    /// The camera is open. `scanned` is set once a payload is being resolved.
    Scanning { operator: User, scanned: bool },
    Reviewing { operator: User, edit: PendingEdit },
    /// The "are you sure?" step. `committing` is set while the write is in flight.
    Confirming {
        operator: User,
        edit: PendingEdit,
        committing: bool,
    },
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Loading => "loading",
            Screen::Error { .. } => "error",
            Screen::UserSelect { .. } => "user_select",
            Screen::ScanReady { .. } => "scan_ready",
            Screen::Scanning { .. } => "scanning",
            Screen::Reviewing { .. } => "reviewing",
            Screen::Confirming { .. } => "confirming",
        }
    }

    /// The operator the session is acting as, once one has been chosen.
    pub fn operator(&self) -> Option<&User> {
        match self {
            Screen::ScanReady { operator }
            | Screen::Scanning { operator, .. }
            | Screen::Reviewing { operator, .. }
            | Screen::Confirming { operator, .. } => Some(operator),
            _ => None,
        }
    }

    /// The edit in progress, if any.
    pub fn edit(&self) -> Option<&PendingEdit> {
        match self {
            Screen::Reviewing { edit, .. } | Screen::Confirming { edit, .. } => Some(edit),
            _ => None,
        }
    }
}

/// A blocking acknowledgment shown to the operator.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Success(String),
    Info(String),
    Failure(WorkflowError),
}

impl Notice {
    pub fn is_failure(&self) -> bool {
        matches!(self, Notice::Failure(_))
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Success(message) | Notice::Info(message) => f.write_str(message),
            Notice::Failure(error) => write!(f, "Error: {error}"),
        }
    }
}

/// Read-only snapshot published after every transition.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowView {
    pub screen: Screen,
    pub permission: PermissionState,
    /// The notice awaiting acknowledgment, oldest first.
    pub notice: Option<Notice>,
    /// Notices queued behind `notice`.
    pub queued_notices: usize,
    pub generation: u64,
}

impl WorkflowView {
    pub fn draft_quantity(&self) -> Option<u32> {
        self.screen.edit().map(|edit| edit.draft_quantity)
    }
}
