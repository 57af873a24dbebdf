//! Runtime orchestration and lifecycle management.
//!
//! - **Actor lifecycle management**: Starting the workflow actor with its services and shutting it down
//! - **Dependency wiring**: Building the inventory client, permission gate and resolver from configuration
//! - **Observability setup**: Initializing tracing and logging
//!
//! # Main Components
//!
//! - [`ScannerSystem`] - Owns the workflow actor task and hands out its client
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod scanner_system;
pub mod tracing;

pub use scanner_system::*;
pub use tracing::*;
