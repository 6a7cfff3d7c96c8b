//! Core types and configuration for logspool

pub mod config;
pub mod constants;
pub mod error;
pub mod meta;
pub mod template;
pub mod types;

pub use config::{AdapterConfig, FailureMode};
pub use error::{Error, Result};
pub use meta::MetaExtractor;
pub use template::Template;
pub use types::{ContainerDetails, ContainerMeta, ContainerStatus, LifecycleEvent, LogMessage};
