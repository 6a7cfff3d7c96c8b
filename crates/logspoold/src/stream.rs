//! Stream multiplexer - the write path
//!
//! Consumes the interleaved log message stream and writes each message
//! through the file store. Under the default fail-fast mode any write
//! error stops the loop for all containers; under isolate mode only the
//! failing container's file entry is dropped.

use logspool_core::{FailureMode, LogMessage, Result};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::adapter::FileAdapter;

/// Consume log messages until the channel closes or a write fails
/// fatally
pub async fn run(adapter: FileAdapter, mut messages: mpsc::Receiver<LogMessage>) -> Result<()> {
    while let Some(message) = messages.recv().await {
        if let Err(e) = adapter.write_message(&message) {
            match adapter.config().failure_mode {
                FailureMode::FailFast => {
                    error!("Write path failed, stopping log shipping: {}", e);
                    return Err(e);
                }
                FailureMode::Isolate => {
                    warn!(
                        "Write failed for container {}, dropping its log file: {}",
                        message.container.id, e
                    );
                    adapter.files().close(&message.container.id);
                }
            }
        }
    }
    info!("Log message stream ended");
    Ok(())
}
