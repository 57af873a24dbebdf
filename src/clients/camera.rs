//! # Camera Permission Gate
//!
//! The device is asked for camera access exactly once per session. [`PermissionGate`]
//! performs that request and caches the answer; later reads never ask again.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::info;

use crate::model::PermissionState;

/// The device capability that grants camera access.
#[async_trait]
pub trait CameraAccess: Send + Sync {
    async fn request_permission(&self) -> PermissionState;
}

/// A camera whose answer is fixed by configuration.
///
/// Used by the terminal front end, where scans are typed rather than decoded.
#[derive(Debug, Clone, Copy)]
pub struct ConfiguredCamera {
    state: PermissionState,
}

impl ConfiguredCamera {
    pub fn new(state: PermissionState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl CameraAccess for ConfiguredCamera {
    async fn request_permission(&self) -> PermissionState {
        self.state
    }
}

/// Requests camera permission once and caches the result.
#[derive(Clone)]
pub struct PermissionGate {
    camera: Arc<dyn CameraAccess>,
    state: Arc<OnceCell<PermissionState>>,
}

impl PermissionGate {
    pub fn new(camera: Arc<dyn CameraAccess>) -> Self {
        Self {
            camera,
            state: Arc::new(OnceCell::new()),
        }
    }

    /// Returns the cached state, requesting it from the device on first use.
    ///
    /// Concurrent first callers share a single request.
    pub async fn acquire(&self) -> PermissionState {
        *self
            .state
            .get_or_init(|| async {
                let state = self.camera.request_permission().await;
                info!(%state, "Camera permission settled");
                state
            })
            .await
    }
}
