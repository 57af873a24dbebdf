//! # Scan Resolver
//!
//! Turns raw decoded scan text into a domain reference.
//!
//! Exactly one strategy is active per deployment, chosen at configuration time:
//!
//! - [`EndpointResolver`] - the text is a product URL; the product is fetched from it.
//! - [`IdentityResolver`] - the text names one of the already-loaded users.
//!
//! The workflow only sees the [`ScanResolver`] trait, so it never tries both.

pub mod endpoint;
pub mod error;
pub mod identity;

pub use endpoint::*;
pub use error::*;
pub use identity::*;

use std::sync::Arc;

use async_trait::async_trait;

use crate::clients::InventoryService;
use crate::config::ScanMode;
use crate::model::{ScannedProduct, User};

/// What a scan resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Product(ScannedProduct),
    User(User),
}

/// A scan resolution strategy.
#[async_trait]
pub trait ScanResolver: Send + Sync {
    /// Resolve `payload`. `users` is the list loaded at startup.
    async fn resolve(&self, payload: &str, users: &[User])
        -> Result<Resolution, ScanResolutionError>;
}

/// Builds the resolver for a deployment's scan mode.
pub fn resolver_for(mode: ScanMode, inventory: Arc<dyn InventoryService>) -> Arc<dyn ScanResolver> {
    match mode {
        ScanMode::Endpoint => Arc::new(EndpointResolver::new(inventory)),
        ScanMode::Identity => Arc::new(IdentityResolver),
    }
}
