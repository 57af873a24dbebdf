//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging with the `tracing` crate.
//!
//! ## Configuration
//!
//! Log lines use the compact format and hide the crate/module prefix (`with_target(false)`).
//! The level comes from the `RUST_LOG` environment variable.
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: Startup and shutdown of the workflow actor
//! - **Transitions**: Every dispatched input, effect and completion (debug)
//! - **Remote Calls**: One span per inventory request with its endpoint
//! - **Failures**: Notices raised, stale completions dropped, fallback acting user used (warn)
//!
//! ## Usage Examples
//!
//! ```bash
//! # Session milestones only
//! RUST_LOG=info cargo run
//!
//! # Every event, effect and screen change
//! RUST_LOG=debug cargo run
//!
//! # Only the HTTP client
//! RUST_LOG=stock_scanner::clients=debug cargo run
//! ```
//!
//! ## Workflow Trace Example
//!
//! **With `RUST_LOG=info`**:
//!
//! ```text
//! INFO Actor started machine_type="Workflow"
//! INFO Camera permission settled state=granted
//! INFO User list loaded count=3
//! INFO Operator selected id=1 username="ana"
//! INFO Resolving scan payload=https://10.0.0.5/api/products/7 generation=3
//! INFO Product ready for review id=product_7 stock=42 endpoint=http://10.0.0.5/api/products/7
//! INFO Committing stock update endpoint=http://10.0.0.5/api/products/7 quantity=10 acting_user=1
//! INFO Notice raised notice=Quantity updated
//! ```
//!
//! Calling it twice is harmless; the second call leaves the installed subscriber in place.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init();
}
