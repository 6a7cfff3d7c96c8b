//! Event listener - consumes the container lifecycle stream

use logspool_core::{ContainerStatus, LifecycleEvent, LogMessage};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::adapter::FileAdapter;
use crate::cleanup;

/// Consume lifecycle events until the stream closes. Start and restart
/// populate the registry and attach a log pump; destroy spawns an
/// independent cleanup task.
pub async fn listen(
    adapter: FileAdapter,
    mut events: mpsc::Receiver<LifecycleEvent>,
    msg_tx: mpsc::Sender<LogMessage>,
) {
    while let Some(event) = events.recv().await {
        debug!("Lifecycle event: {} {}", event.status, event.id);
        match event.status {
            ContainerStatus::Start | ContainerStatus::Restart => {
                adapter.save(&event.id).await;
                adapter.spawn_pump(event.id, msg_tx.clone());
            }
            ContainerStatus::Destroy => {
                tokio::spawn(cleanup::clean(adapter.clone(), event.id));
            }
        }
    }
    info!("Lifecycle event stream ended");
}
