//! Mock container runtime for testing

use std::collections::HashMap;

use async_trait::async_trait;
use logspool_core::{ContainerDetails, Error, LifecycleEvent, Result};
use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::traits::ContainerRuntime;

/// An in-memory runtime: tests add and remove containers, emit lifecycle
/// events, and push log lines.
#[derive(Default)]
pub struct MockRuntime {
    containers: Mutex<HashMap<String, ContainerDetails>>,
    event_subscribers: Mutex<Vec<mpsc::Sender<LifecycleEvent>>>,
    log_subscribers: Mutex<HashMap<String, Vec<mpsc::Sender<String>>>>,
    fail_inspect: bool,
}

impl MockRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// A runtime whose inspect calls always fail
    pub fn failing_inspect() -> Self {
        Self {
            fail_inspect: true,
            ..Default::default()
        }
    }

    /// Register a container as running
    pub fn add_container(&self, details: ContainerDetails) {
        self.containers.lock().insert(details.id.clone(), details);
    }

    /// Remove a container from the running set
    pub fn remove_container(&self, id: &str) {
        self.containers.lock().remove(id);
    }

    /// Deliver a lifecycle event to all subscribers
    pub async fn emit(&self, event: LifecycleEvent) {
        let subscribers = self.event_subscribers.lock().clone();
        for tx in subscribers {
            let _ = tx.send(event.clone()).await;
        }
    }

    /// Deliver a log line to all followers of a container's stream
    pub async fn push_log(&self, id: &str, line: &str) {
        let subscribers = self
            .log_subscribers
            .lock()
            .get(id)
            .cloned()
            .unwrap_or_default();
        for tx in subscribers {
            let _ = tx.send(line.to_string()).await;
        }
    }

    /// Whether anyone has subscribed to lifecycle events yet
    pub fn has_event_subscribers(&self) -> bool {
        !self.event_subscribers.lock().is_empty()
    }

    /// Whether anyone follows this container's log stream
    pub fn has_log_subscribers(&self, id: &str) -> bool {
        self.log_subscribers
            .lock()
            .get(id)
            .map_or(false, |subs| !subs.is_empty())
    }
}

#[async_trait]
impl ContainerRuntime for MockRuntime {
    async fn inspect(&self, id: &str) -> Result<ContainerDetails> {
        if self.fail_inspect {
            return Err(Error::InspectFailed(id.to_string()));
        }
        self.containers
            .lock()
            .get(id)
            .cloned()
            .ok_or_else(|| Error::InspectFailed(id.to_string()))
    }

    async fn list_running(&self) -> Result<Vec<String>> {
        Ok(self.containers.lock().keys().cloned().collect())
    }

    async fn events(&self) -> Result<mpsc::Receiver<LifecycleEvent>> {
        let (tx, rx) = mpsc::channel(64);
        self.event_subscribers.lock().push(tx);
        Ok(rx)
    }

    async fn stream_logs(&self, id: &str) -> Result<mpsc::Receiver<String>> {
        let (tx, rx) = mpsc::channel(256);
        self.log_subscribers
            .lock()
            .entry(id.to_string())
            .or_default()
            .push(tx);
        Ok(rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(id: &str, name: &str) -> ContainerDetails {
        ContainerDetails {
            id: id.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_inspect_running_container() {
        let runtime = MockRuntime::new();
        runtime.add_container(details("c1", "/web-1"));

        let found = runtime.inspect("c1").await.unwrap();
        assert_eq!(found.display_name(), "web-1");
        assert!(runtime.inspect("ghost").await.is_err());
    }

    #[tokio::test]
    async fn test_failing_inspect() {
        let runtime = MockRuntime::failing_inspect();
        runtime.add_container(details("c1", "/web-1"));
        assert!(runtime.inspect("c1").await.is_err());
    }

    #[tokio::test]
    async fn test_list_running_follows_membership() {
        let runtime = MockRuntime::new();
        runtime.add_container(details("c1", "/a"));
        runtime.add_container(details("c2", "/b"));
        assert_eq!(runtime.list_running().await.unwrap().len(), 2);

        runtime.remove_container("c1");
        assert_eq!(runtime.list_running().await.unwrap(), vec!["c2".to_string()]);
    }

    #[tokio::test]
    async fn test_events_delivery() {
        use logspool_core::ContainerStatus;

        let runtime = MockRuntime::new();
        let mut events = runtime.events().await.unwrap();
        assert!(runtime.has_event_subscribers());

        runtime
            .emit(LifecycleEvent::new("c1", ContainerStatus::Start))
            .await;
        let event = events.recv().await.unwrap();
        assert_eq!(event.id, "c1");
        assert_eq!(event.status, ContainerStatus::Start);
    }

    #[tokio::test]
    async fn test_log_delivery() {
        let runtime = MockRuntime::new();
        let mut lines = runtime.stream_logs("c1").await.unwrap();
        assert!(runtime.has_log_subscribers("c1"));

        runtime.push_log("c1", "hello").await;
        runtime.push_log("c2", "elsewhere").await;
        assert_eq!(lines.recv().await.unwrap(), "hello");
    }
}
