//! # Stock Scanner
//!
//! > **An inventory scanner session as an actor-driven state machine.**
//!
//! An operator picks themselves from the user list, scans a product's QR code, edits the
//! stock quantity and confirms the change, which is written back to the inventory service.
//!
//! ## Design
//!
//! ### 1. One Owner for Session State
//! The whole session (screen, pending edit, permission, notices) lives in a single
//! [`Workflow`](workflow::Workflow) owned by one actor task. Inputs and service completions are
//! applied one at a time, so there are no locks and no half-updated screens.
//!
//! ### 2. Transitions Are Pure
//! Handling an event never performs I/O. It returns effects that the actor runs on spawned
//! tasks against injected services; results come back as events. Completions carry the
//! generation they were issued under and are dropped once the screen has moved on.
//!
//! ### 3. Async Context Injection
//! Services (inventory client, permission gate, scan resolver) are injected through
//! [`MachineActor::run`](framework::MachineActor::run), not at construction time, so tests
//! swap in [`clients::mock`] doubles without touching the workflow.
//!
//! ### 4. Observability
//! `tracing` everywhere with structured fields. See the [`lifecycle::tracing`] module.
//!
//! ## Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! The generic `MachineActor<T>` that runs any [`StateMachine`](framework::StateMachine).
//!
//! ### 2. The Orchestrator ([`lifecycle`])
//! - **Key items**: [`ScannerSystem`](lifecycle::ScannerSystem), [`setup_tracing`](lifecycle::setup_tracing).
//!
//! ### 3. The Interface ([`clients`])
//! - **Remote service**: [`InventoryService`](clients::InventoryService) and its HTTP implementation.
//! - **Camera**: [`PermissionGate`](clients::PermissionGate), asked once per session.
//! - **Workflow handle**: [`WorkflowClient`](clients::WorkflowClient).
//!
//! ### 4. The Domain ([`model`], [`resolver`], [`workflow`])
//! Records, scan resolution strategies, and the screen state machine itself.
//!
//! ### 5. The Front End ([`terminal`], [`config`])
//! Command parsing and rendering for the terminal binary, and `SCANNER_*` configuration.
//!
//! ## Quick Start
//!
//! ```bash
//! SCANNER_SERVICE_URL=http://192.168.0.16:8080 RUST_LOG=info cargo run
//! ```

pub mod clients;
pub mod config;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod resolver;
pub mod terminal;
pub mod workflow;
