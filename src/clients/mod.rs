//! Service clients and the domain-specific handle to the workflow actor.

pub mod camera;
pub mod error;
pub mod inventory;
pub mod mock;
pub mod workflow_client;

pub use camera::*;
pub use error::*;
pub use inventory::*;
pub use workflow_client::*;
