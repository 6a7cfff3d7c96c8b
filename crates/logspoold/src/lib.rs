//! logspool daemon
//!
//! Subscribes to the container runtime's lifecycle events and log
//! streams and ships each container's output to per-container files
//! under a configured root, with size-based rotation and deferred
//! cleanup after container removal.

pub mod adapter;
pub mod cleanup;
pub mod cli;
pub mod listener;
pub mod stream;

pub use adapter::FileAdapter;
pub use cli::Cli;
