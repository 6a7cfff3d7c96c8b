//! File store: container id -> open log file

use std::collections::HashMap;

use logspool_core::Result;
use parking_lot::Mutex;
use tracing::debug;

use crate::writer::LogFile;

/// Open log files keyed by container id
///
/// Shared between the stream multiplexer (which creates entries and
/// writes through them) and cleanup tasks (which close and remove them).
/// Every operation holds the map lock for its full duration, so a
/// cleanup cannot close a handle mid-append.
#[derive(Default)]
pub struct FileStore {
    files: Mutex<HashMap<String, LogFile>>,
}

impl FileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an entry exists for this container
    pub fn contains(&self, id: &str) -> bool {
        self.files.lock().contains_key(id)
    }

    /// Register a freshly created log file for a container
    pub fn insert(&self, id: impl Into<String>, file: LogFile) {
        self.files.lock().insert(id.into(), file);
    }

    /// Append rendered bytes through the container's entry, rotating if
    /// needed. Returns `Ok(false)` if no entry exists (the container was
    /// cleaned up concurrently); the caller decides whether to recreate.
    pub fn write(&self, id: &str, bytes: &[u8]) -> Result<bool> {
        let mut files = self.files.lock();
        match files.remove(id) {
            Some(file) => {
                // On error the entry stays removed; fail-fast kills the
                // loop anyway and isolate wants exactly this.
                let file = file.append(bytes)?;
                files.insert(id.to_string(), file);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Close and remove the container's entry. Returns whether an entry
    /// existed.
    pub fn close(&self, id: &str) -> bool {
        match self.files.lock().remove(id) {
            Some(file) => {
                debug!("Closed log file {}", file.path().display());
                true
            }
            None => false,
        }
    }

    /// Close every open handle (adapter teardown)
    pub fn close_all(&self) {
        let mut files = self.files.lock();
        debug!("Closing {} open log files", files.len());
        files.clear();
    }

    pub fn len(&self) -> usize {
        self.files.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.lock().is_empty()
    }
}
