//! Core types for logspool

use std::collections::HashMap;
use std::str::FromStr;

use crate::error::Error;

/// Lifecycle transition reported by the container runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerStatus {
    Start,
    Restart,
    Destroy,
}

impl ContainerStatus {
    /// Parse a runtime event status, ignoring statuses the adapter
    /// does not react to
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "start" => Some(ContainerStatus::Start),
            "restart" => Some(ContainerStatus::Restart),
            "destroy" => Some(ContainerStatus::Destroy),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerStatus::Start => "start",
            ContainerStatus::Restart => "restart",
            ContainerStatus::Destroy => "destroy",
        }
    }
}

impl FromStr for ContainerStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        Self::parse(s).ok_or_else(|| Error::config(format!("Unknown container status: {}", s)))
    }
}

impl std::fmt::Display for ContainerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A lifecycle event for one container
#[derive(Debug, Clone)]
pub struct LifecycleEvent {
    pub id: String,
    pub status: ContainerStatus,
}

impl LifecycleEvent {
    pub fn new(id: impl Into<String>, status: ContainerStatus) -> Self {
        Self {
            id: id.into(),
            status,
        }
    }
}

/// Inspectable container configuration, as reported by the runtime
#[derive(Debug, Clone, Default)]
pub struct ContainerDetails {
    pub id: String,
    /// Raw name; Docker inspect reports it with a leading slash
    pub name: String,
    /// Environment entries in `KEY=value` form
    pub env: Vec<String>,
    pub labels: HashMap<String, String>,
}

impl ContainerDetails {
    /// Display name with the runtime's leading slash stripped
    pub fn display_name(&self) -> &str {
        self.name.strip_prefix('/').unwrap_or(&self.name)
    }
}

/// One log line from a container, tagged with its metadata
#[derive(Debug, Clone)]
pub struct LogMessage {
    pub container: ContainerDetails,
    pub data: String,
}

/// Derived placement metadata for a container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerMeta {
    /// Project bucket, from the configured label; empty if unset
    pub project: String,
    /// Store bucket, lower-cased value of the configured environment
    /// variable; empty if unset
    pub store: String,
    /// Container display name
    pub name: String,
}
