//! # Service Doubles
//!
//! In-memory stand-ins for the workflow's collaborators, used by unit and integration tests.
//!
//! | Double | Replaces | Use |
//! |--------|----------|-----|
//! | [`MockInventory`] | [`HttpInventoryClient`](super::HttpInventoryClient) | Scripted responses, recorded writes |
//! | [`DeferredCamera`] | A device camera | Controls *when* the permission answer arrives |
//!
//! ## Expectations
//!
//! [`MockInventory`] answers each call with the first matching expectation, consuming it.
//! Calls with no matching expectation fail with [`ServiceError::Network`] and are counted;
//! [`MockInventory::verify`] panics if any expectation is left over or any call was unexpected.
//!
//! ```rust
//! use stock_scanner::clients::mock::MockInventory;
//! use stock_scanner::clients::{InventoryService, ServiceError};
//! use stock_scanner::model::User;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockInventory::new();
//!     mock.expect_list_users().return_ok(vec![User::new(1, "ana")]);
//!     mock.expect_fetch("http://10.0.0.5/api/products/9")
//!         .return_err(ServiceError::NotFound { status: 404 });
//!
//!     let users = mock.list_users().await.unwrap();
//!     assert_eq!(users[0].username, "ana");
//!
//!     let url = "http://10.0.0.5/api/products/9".parse().unwrap();
//!     assert!(mock.fetch_product_at(&url).await.is_err());
//!
//!     mock.verify();
//! }
//! ```
//!
//! ## Holding a Response
//!
//! `.after(gate)` keeps a call pending until the test calls `gate.notify_one()`, which lets
//! a test change the workflow's state while a request is still in flight.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;
use url::Url;

use crate::model::{PermissionState, Product, StockUpdate, User, UserId};

use super::camera::CameraAccess;
use super::error::ServiceError;
use super::inventory::InventoryService;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

enum Expectation {
    ListUsers {
        gate: Option<Arc<Notify>>,
        response: Result<Vec<User>, ServiceError>,
    },
    Fetch {
        endpoint: String,
        gate: Option<Arc<Notify>>,
        response: Result<Product, ServiceError>,
    },
    Update {
        endpoint: String,
        gate: Option<Arc<Notify>>,
        response: Result<(), ServiceError>,
    },
}

#[derive(Default)]
struct MockState {
    expectations: Mutex<VecDeque<Expectation>>,
    fetched: Mutex<Vec<Url>>,
    updates: Mutex<Vec<StockUpdate>>,
    unexpected: AtomicUsize,
}

/// A scripted [`InventoryService`].
///
/// Clones share expectations and recordings, so a test can keep one handle for
/// [`verify`](MockInventory::verify) after handing another to the system under test.
#[derive(Clone, Default)]
pub struct MockInventory {
    state: Arc<MockState>,
}

impl MockInventory {
    /// Creates a new mock with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a `list_users` call.
    pub fn expect_list_users(&mut self) -> ExpectationBuilder<Vec<User>> {
        ExpectationBuilder::new(self.state.clone(), |gate, response| {
            Expectation::ListUsers { gate, response }
        })
    }

    /// Expects a `fetch_product_at` call for `endpoint`.
    pub fn expect_fetch(&mut self, endpoint: &str) -> ExpectationBuilder<Product> {
        let endpoint = endpoint.to_string();
        ExpectationBuilder::new(self.state.clone(), move |gate, response| {
            Expectation::Fetch {
                endpoint,
                gate,
                response,
            }
        })
    }

    /// Expects an `update_product_at` call for `endpoint`.
    pub fn expect_update(&mut self, endpoint: &str) -> ExpectationBuilder<()> {
        let endpoint = endpoint.to_string();
        ExpectationBuilder::new(self.state.clone(), move |gate, response| {
            Expectation::Update {
                endpoint,
                gate,
                response,
            }
        })
    }

    /// Endpoints fetched so far, in call order.
    pub fn fetched(&self) -> Vec<Url> {
        self.state.fetched.lock().unwrap().clone()
    }

    /// Writes received so far, in call order, including rejected ones.
    pub fn updates(&self) -> Vec<StockUpdate> {
        self.state.updates.lock().unwrap().clone()
    }

    /// Verifies that all expectations were met and nothing unexpected was called.
    pub fn verify(&self) {
        let remaining = self.state.expectations.lock().unwrap().len();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
        let unexpected = self.state.unexpected.load(Ordering::SeqCst);
        if unexpected != 0 {
            panic!("{unexpected} unexpected call(s)");
        }
    }

    fn take(&self, matches: impl Fn(&Expectation) -> bool) -> Option<Expectation> {
        let mut exps = self.state.expectations.lock().unwrap();
        let index = exps.iter().position(matches)?;
        exps.remove(index)
    }

    fn unexpected(&self, call: String) -> ServiceError {
        self.state.unexpected.fetch_add(1, Ordering::SeqCst);
        ServiceError::Network(format!("unexpected call: {call}"))
    }
}

async fn hold(gate: Option<Arc<Notify>>) {
    if let Some(gate) = gate {
        gate.notified().await;
    }
}

#[async_trait]
impl InventoryService for MockInventory {
    async fn list_users(&self) -> Result<Vec<User>, ServiceError> {
        match self.take(|e| matches!(e, Expectation::ListUsers { .. })) {
            Some(Expectation::ListUsers { gate, response }) => {
                hold(gate).await;
                response
            }
            _ => Err(self.unexpected("list_users".to_string())),
        }
    }

    async fn fetch_product_at(&self, endpoint: &Url) -> Result<Product, ServiceError> {
        self.state.fetched.lock().unwrap().push(endpoint.clone());
        let expected = self.take(
            |e| matches!(e, Expectation::Fetch { endpoint: url, .. } if url == endpoint.as_str()),
        );
        match expected {
            Some(Expectation::Fetch { gate, response, .. }) => {
                hold(gate).await;
                response
            }
            _ => Err(self.unexpected(format!("fetch {endpoint}"))),
        }
    }

    async fn update_product_at(
        &self,
        endpoint: &Url,
        product: &Product,
        acting_user: Option<UserId>,
    ) -> Result<(), ServiceError> {
        self.state.updates.lock().unwrap().push(StockUpdate {
            endpoint: endpoint.clone(),
            product: product.clone(),
            acting_user,
        });
        let expected = self.take(
            |e| matches!(e, Expectation::Update { endpoint: url, .. } if url == endpoint.as_str()),
        );
        match expected {
            Some(Expectation::Update { gate, response, .. }) => {
                hold(gate).await;
                response
            }
            _ => Err(self.unexpected(format!("update {endpoint}"))),
        }
    }
}

/// Builder for a single expectation.
pub struct ExpectationBuilder<R> {
    state: Arc<MockState>,
    gate: Option<Arc<Notify>>,
    build: Box<dyn FnOnce(Option<Arc<Notify>>, Result<R, ServiceError>) -> Expectation + Send>,
}

impl<R> ExpectationBuilder<R> {
    fn new(
        state: Arc<MockState>,
        build: impl FnOnce(Option<Arc<Notify>>, Result<R, ServiceError>) -> Expectation + Send + 'static,
    ) -> Self {
        Self {
            state,
            gate: None,
            build: Box::new(build),
        }
    }

    /// Keeps the call pending until `gate` is notified.
    pub fn after(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: ServiceError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, ServiceError>) {
        let expectation = (self.build)(self.gate, response);
        self.state
            .expectations
            .lock()
            .unwrap()
            .push_back(expectation);
    }
}

// =============================================================================
// CAMERA
// =============================================================================

/// A camera that answers only once the test calls [`release`](DeferredCamera::release).
#[derive(Clone)]
pub struct DeferredCamera {
    answer: PermissionState,
    released: Arc<Notify>,
    requests: Arc<AtomicUsize>,
}

impl DeferredCamera {
    pub fn new(answer: PermissionState) -> Self {
        Self {
            answer,
            released: Arc::new(Notify::new()),
            requests: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Lets the pending permission request complete.
    pub fn release(&self) {
        self.released.notify_one();
    }

    /// How many times the device was asked.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CameraAccess for DeferredCamera {
    async fn request_permission(&self) -> PermissionState {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.released.notified().await;
        self.answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_expectations_match_by_endpoint() {
        let mut mock = MockInventory::new();
        mock.expect_fetch("http://host/api/products/1")
            .return_ok(Product::new(1, "Nut", 5));
        mock.expect_fetch("http://host/api/products/2")
            .return_ok(Product::new(2, "Bolt", 6));

        let second: Url = "http://host/api/products/2".parse().unwrap();
        let first: Url = "http://host/api/products/1".parse().unwrap();
        assert_eq!(mock.fetch_product_at(&second).await.unwrap().name, "Bolt");
        assert_eq!(mock.fetch_product_at(&first).await.unwrap().name, "Nut");
        assert_eq!(mock.fetched(), vec![second, first]);
        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "unexpected call")]
    async fn test_unexpected_call_fails_verification() {
        let mock = MockInventory::new();
        let url: Url = "http://host/api/products/1".parse().unwrap();
        assert!(mock.fetch_product_at(&url).await.is_err());
        mock.verify();
    }

    #[tokio::test]
    async fn test_held_response_waits_for_gate() {
        let mut mock = MockInventory::new();
        let gate = Arc::new(Notify::new());
        mock.expect_list_users().after(gate.clone()).return_ok(Vec::new());

        let pending = tokio::spawn({
            let mock = mock.clone();
            async move { mock.list_users().await }
        });
        tokio::task::yield_now().await;
        assert!(!pending.is_finished());

        gate.notify_one();
        assert_eq!(pending.await.unwrap(), Ok(Vec::new()));
        mock.verify();
    }

    #[tokio::test]
    async fn test_deferred_camera_answers_after_release() {
        let camera = DeferredCamera::new(PermissionState::Granted);
        camera.release();
        assert_eq!(camera.request_permission().await, PermissionState::Granted);
        assert_eq!(camera.requests(), 1);
    }
}
