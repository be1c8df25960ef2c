use crate::checkout::{self, CheckoutClient, CheckoutError};
use crate::clients::Collaborators;
use crate::config::CheckoutConfig;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Runtime orchestrator for the checkout flow.
///
/// `CheckoutSystem` is responsible for:
/// - **Lifecycle Management**: starting the checkout actor and stopping it again
/// - **Dependency Wiring**: handing the storefront APIs and host seams to the actor
///
/// # Example
///
/// ```ignore
/// let system = CheckoutSystem::new(CheckoutConfig::from_env(), collaborators);
///
/// system.client.open(NavigationParams::cart("cart-9")).await?;
/// system.client.submit().await?;
///
/// system.shutdown().await?;
/// ```
pub struct CheckoutSystem {
    /// Client for driving the checkout actor.
    pub client: CheckoutClient,

    /// Task handle of the running actor (used for graceful shutdown).
    handle: JoinHandle<()>,
}

impl CheckoutSystem {
    /// Creates the checkout actor and spawns it with `collaborators` injected.
    pub fn new(config: CheckoutConfig, collaborators: Collaborators) -> Self {
        let (actor, client) = checkout::new(config);
        let handle = tokio::spawn(actor.run(collaborators));
        Self { client, handle }
    }

    /// Gracefully shuts down the checkout actor.
    ///
    /// Dropping the client closes the request channel and the actor leaves its loop.
    /// Clones of the client handed out earlier must be dropped first, or this waits
    /// for them.
    pub async fn shutdown(self) -> Result<(), CheckoutError> {
        info!("Shutting down checkout...");
        drop(self.client);

        if let Err(e) = self.handle.await {
            error!("Checkout actor task failed: {:?}", e);
            return Err(CheckoutError::Shutdown(e.to_string()));
        }

        info!("Checkout shutdown complete.");
        Ok(())
    }
}
