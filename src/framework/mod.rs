//! Generic actor framework for driving a state machine.
//!
//! This module provides the building blocks for running a session model as an actor that
//! processes operator input and I/O completions one message at a time.
//!
//! # Main Components
//!
//! - [`StateMachine`] - Trait that a session model implements
//! - [`MachineActor`] - The actor owning the machine and running its event loop
//! - [`MachineClient`] - Type-safe, cloneable handle for dispatching events
//! - [`FrameworkError`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test client wrappers without spawning an actor.

pub mod core;
pub mod mock;

// Re-export core types for convenience
pub use self::core::*;
