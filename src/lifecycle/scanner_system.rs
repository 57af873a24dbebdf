use std::sync::Arc;

use tracing::{error, info};

use crate::clients::{
    ConfiguredCamera, HttpInventoryClient, PermissionGate, ServiceError, WorkflowClient,
};
use crate::config::AppConfig;
use crate::framework::MachineActor;
use crate::resolver::resolver_for;
use crate::workflow::{Services, Workflow};

const REQUEST_BUFFER: usize = 32;

/// The runtime orchestrator for a scanner session.
///
/// `ScannerSystem` is responsible for:
/// - **Lifecycle Management**: Starting the workflow actor and stopping it again
/// - **Dependency Wiring**: Injecting the inventory client, permission gate and scan resolver
///   into the actor's context
///
/// # Example
///
/// ```ignore
/// let system = ScannerSystem::from_config(&config)?;
///
/// system.workflow.wait_for(|view| !matches!(view.screen, Screen::Loading)).await?;
/// system.workflow.select_user(UserId(1)).await?;
///
/// system.shutdown().await?;
/// ```
pub struct ScannerSystem {
    /// Client for driving the workflow actor
    pub workflow: WorkflowClient,

    handle: tokio::task::JoinHandle<()>,
}

impl ScannerSystem {
    /// Spawns the workflow actor with the given services.
    ///
    /// Startup work (user list, camera permission) begins immediately.
    pub fn new(services: Services) -> Self {
        let (actor, client) = MachineActor::new(Workflow::new(), REQUEST_BUFFER);
        let handle = tokio::spawn(actor.run(services));

        Self {
            workflow: WorkflowClient::new(client),
            handle,
        }
    }

    /// Builds the production services from configuration and starts the system.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, ServiceError> {
        let inventory = Arc::new(HttpInventoryClient::new(&config.service)?);
        info!(
            users_url = %inventory.users_url(),
            scan_mode = ?config.scan_mode,
            "Inventory client ready"
        );

        let services = Services {
            resolver: resolver_for(config.scan_mode, inventory.clone()),
            inventory,
            gate: PermissionGate::new(Arc::new(ConfiguredCamera::new(config.camera_permission))),
        };
        Ok(Self::new(services))
    }

    /// Gracefully shuts down the system.
    ///
    /// Dropping the client closes the actor's request channel; the actor then leaves its loop.
    /// Any other clones of the client must be dropped first.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if the actor shut down cleanly
    /// - `Err(String)` if the actor task failed or panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down scanner...");
        drop(self.workflow);

        if let Err(e) = self.handle.await {
            error!("Workflow task failed: {:?}", e);
            return Err(format!("Workflow task failed: {:?}", e));
        }

        info!("Scanner shutdown complete.");
        Ok(())
    }
}
