//! Adapter configuration

use std::path::PathBuf;
use std::str::FromStr;

use crate::constants;
use crate::error::Error;

/// Write-path behavior when a filesystem or render error occurs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureMode {
    /// Any write-path error stops log shipping for all containers
    #[default]
    FailFast,
    /// A write-path error drops only the failing container's file entry
    Isolate,
}

impl FailureMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureMode::FailFast => "fail-fast",
            FailureMode::Isolate => "isolate",
        }
    }
}

impl FromStr for FailureMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.to_lowercase().as_str() {
            "fail-fast" | "failfast" => Ok(FailureMode::FailFast),
            "isolate" => Ok(FailureMode::Isolate),
            _ => Err(Error::InvalidFailureMode(s.to_string())),
        }
    }
}

impl std::fmt::Display for FailureMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Configuration for one adapter instance
#[derive(Debug, Clone)]
pub struct AdapterConfig {
    /// Root directory under which container log directories are created
    pub root: PathBuf,
    /// Container runtime endpoint
    pub endpoint: String,
    /// Container environment variable selecting the store bucket
    pub store_key: String,
    /// Container label selecting the project bucket
    pub project_label: String,
    /// Message render template
    pub template: String,
    /// Write-path failure behavior
    pub failure_mode: FailureMode,
}

impl AdapterConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            endpoint: constants::DEFAULT_ENDPOINT.to_string(),
            store_key: constants::DEFAULT_STORE_KEY.to_string(),
            project_label: constants::DEFAULT_PROJECT_LABEL.to_string(),
            template: constants::DEFAULT_TEMPLATE.to_string(),
            failure_mode: FailureMode::default(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_store_key(mut self, key: impl Into<String>) -> Self {
        self.store_key = key.into();
        self
    }

    pub fn with_project_label(mut self, label: impl Into<String>) -> Self {
        self.project_label = label.into();
        self
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    pub fn with_failure_mode(mut self, mode: FailureMode) -> Self {
        self.failure_mode = mode;
        self
    }
}
