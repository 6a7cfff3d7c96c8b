//! Per-container log files for logspool
//!
//! The write path owns a [`FileStore`] mapping container id to an open
//! [`LogFile`]; cleanup owns a [`ContainerRegistry`] mapping container id
//! to its last-known placement metadata. Both are safe to share across
//! tasks.

mod registry;
mod store;
mod writer;

pub use registry::ContainerRegistry;
pub use store::FileStore;
pub use writer::LogFile;
