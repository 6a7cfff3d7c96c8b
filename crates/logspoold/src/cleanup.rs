//! Cleanup scheduler - deferred removal of a destroyed container's logs
//!
//! One task per destroy event. Waits out the grace period, then checks
//! the running containers for a name collision before removing anything;
//! a rapid restart that presents as destroy+create keeps its logs.

use std::fs;
use std::io;

use logspool_core::{constants, ContainerMeta, Result};
use tracing::{debug, info, warn};

use crate::adapter::FileAdapter;

/// Clean up after a destroyed container, unless a same-named container
/// is running again by the end of the grace period.
pub async fn clean(adapter: FileAdapter, id: String) {
    let Some(meta) = adapter.registry().lookup(&id) else {
        warn!("Container {} to be cleaned is not in the registry", id);
        return;
    };

    tokio::time::sleep(adapter.grace()).await;

    match try_clean(&adapter, &id, &meta).await {
        Ok(true) => info!("Cleaned up container {} ({})", id, meta.name),
        Ok(false) => info!(
            "Found a running container named {}, keeping logs for {}",
            meta.name, id
        ),
        Err(e) => warn!("Cleanup of container {} aborted: {}", id, e),
    }
}

/// Returns `Ok(false)` when a name collision keeps the container
/// logically alive. Any inspection or filesystem error aborts this
/// attempt; state is left for a future destroy event.
async fn try_clean(adapter: &FileAdapter, id: &str, meta: &ContainerMeta) -> Result<bool> {
    for running_id in adapter.runtime().list_running().await? {
        let details = adapter.runtime().inspect(&running_id).await?;
        if details.display_name() == meta.name {
            return Ok(false);
        }
    }

    let dir = constants::container_dir(&adapter.config().root, meta);
    match fs::remove_dir_all(&dir) {
        Ok(()) => info!("Removed {}", dir.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    adapter.registry().remove(id);
    if adapter.files().close(id) {
        debug!("Closed log file of container {}", id);
    }
    Ok(true)
}
