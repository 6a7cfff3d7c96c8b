//! Container runtime trait

use async_trait::async_trait;
use logspool_core::{ContainerDetails, LifecycleEvent, Result};
use tokio::sync::mpsc;

/// Access to the container runtime, as the adapter needs it
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// Inspect one container's current configuration
    async fn inspect(&self, id: &str) -> Result<ContainerDetails>;

    /// Ids of all currently running containers
    async fn list_running(&self) -> Result<Vec<String>>;

    /// Subscribe to container lifecycle events
    async fn events(&self) -> Result<mpsc::Receiver<LifecycleEvent>>;

    /// Follow a container's log output, one text payload per line
    async fn stream_logs(&self, id: &str) -> Result<mpsc::Receiver<String>>;
}
