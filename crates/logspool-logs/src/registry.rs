//! Container registry: container id -> last-known placement metadata
//!
//! Populated by the event listener (and the startup reconciliation pass)
//! and consulted only by cleanup. The write path derives metadata per
//! message and never reads this map.

use std::collections::HashMap;

use logspool_core::ContainerMeta;
use parking_lot::Mutex;

/// Last-known `{project, store, name}` per container id
#[derive(Default)]
pub struct ContainerRegistry {
    containers: Mutex<HashMap<String, ContainerMeta>>,
}

impl ContainerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert a container's metadata
    pub fn save(&self, id: impl Into<String>, meta: ContainerMeta) {
        self.containers.lock().insert(id.into(), meta);
    }

    /// Look up a container's last-known metadata
    pub fn lookup(&self, id: &str) -> Option<ContainerMeta> {
        self.containers.lock().get(id).cloned()
    }

    /// Remove a container once cleanup has confirmed safe deletion
    pub fn remove(&self, id: &str) -> Option<ContainerMeta> {
        self.containers.lock().remove(id)
    }

    pub fn len(&self) -> usize {
        self.containers.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.lock().is_empty()
    }
}
