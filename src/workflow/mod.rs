//! # Update Workflow
//!
//! The scanner session as an explicit state machine.
//!
//! ```text
//! Loading ──► Error (terminal)
//!    │
//!    ▼
//! UserSelect ──► ScanReady ◄──► Scanning ──► Reviewing ◄──► Confirming
//!                   ▲  ▲            │            │               │
//!                   │  └────────────┘            │               │
//!                   └────────────────────────────┴───────────────┘
//! ```
//!
//! [`Workflow`] implements [`StateMachine`](crate::framework::StateMachine): transitions are
//! synchronous and return [`Effect`]s (load users, request permission, resolve a scan,
//! commit an update) which the actor performs against [`Services`]. Completions carry the
//! generation they were issued under and are dropped once the screen has moved on.
//!
//! Failures never escape the workflow. They become [`Notice`]s that block further operator
//! input until acknowledged. The only exception is a failed user-list load, which ends the
//! session on the [`Screen::Error`] screen.

pub mod error;
pub mod events;
pub mod machine;
pub mod state;

pub use error::*;
pub use events::*;
pub use machine::*;
pub use state::*;
