//! File adapter - per-container log shipping state
//!
//! Holds the shared pieces of the adapter: the runtime handle, the
//! container registry, the file store, the metadata extractor, and the
//! render template. The event listener, stream multiplexer, and cleanup
//! tasks all operate on clones of this struct.

use std::sync::Arc;
use std::time::Duration;

use logspool_core::{constants, AdapterConfig, LogMessage, MetaExtractor, Result, Template};
use logspool_logs::{ContainerRegistry, FileStore, LogFile};
use logspool_runtime::ContainerRuntime;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{listener, stream};

/// The file log adapter
#[derive(Clone)]
pub struct FileAdapter {
    runtime: Arc<dyn ContainerRuntime>,
    config: Arc<AdapterConfig>,
    template: Template,
    extractor: MetaExtractor,
    registry: Arc<ContainerRegistry>,
    files: Arc<FileStore>,
    grace: Duration,
    rotate_size: u64,
}

impl FileAdapter {
    /// Build an adapter: parse the render template, then reconcile the
    /// registry against the containers already running. Both failures
    /// are fatal here rather than on the write path.
    pub async fn new(runtime: Arc<dyn ContainerRuntime>, config: AdapterConfig) -> Result<Self> {
        let template = Template::parse(&config.template)?;
        let extractor = MetaExtractor::new(config.project_label.clone(), config.store_key.clone());

        let adapter = Self {
            runtime,
            config: Arc::new(config),
            template,
            extractor,
            registry: Arc::new(ContainerRegistry::new()),
            files: Arc::new(FileStore::new()),
            grace: constants::GRACE_PERIOD,
            rotate_size: constants::ROTATE_SIZE,
        };

        adapter.reconcile().await?;
        Ok(adapter)
    }

    /// Override the cleanup grace period
    pub fn with_grace(mut self, grace: Duration) -> Self {
        self.grace = grace;
        self
    }

    /// Override the rotation threshold for newly created log files
    pub fn with_rotate_size(mut self, rotate_size: u64) -> Self {
        self.rotate_size = rotate_size;
        self
    }

    /// Populate the registry from the containers currently running
    async fn reconcile(&self) -> Result<()> {
        let running = self.runtime.list_running().await?;
        info!("Reconciling {} running containers", running.len());
        for id in running {
            self.save(&id).await;
        }
        Ok(())
    }

    /// Inspect a container and upsert its metadata into the registry.
    /// Inspection failures are logged and skipped.
    pub async fn save(&self, id: &str) {
        match self.runtime.inspect(id).await {
            Ok(details) => {
                let meta = self.extractor.extract(&details);
                debug!("Saving container {} as {:?}", id, meta);
                self.registry.save(id, meta);
            }
            Err(e) => warn!("Inspect failed for container {}: {}", id, e),
        }
    }

    /// Follow a container's log stream, forwarding each line to the
    /// multiplexer channel tagged with the container's metadata.
    pub fn spawn_pump(&self, id: String, tx: mpsc::Sender<LogMessage>) {
        let runtime = Arc::clone(&self.runtime);
        tokio::spawn(async move {
            let details = match runtime.inspect(&id).await {
                Ok(details) => details,
                Err(e) => {
                    warn!("Cannot attach to container {}: {}", id, e);
                    return;
                }
            };
            let mut lines = match runtime.stream_logs(&id).await {
                Ok(lines) => lines,
                Err(e) => {
                    warn!("Cannot follow logs of container {}: {}", id, e);
                    return;
                }
            };
            debug!("Attached to log stream of {}", details.display_name());

            while let Some(data) = lines.recv().await {
                let message = LogMessage {
                    container: details.clone(),
                    data,
                };
                if tx.send(message).await.is_err() {
                    return;
                }
            }
            debug!("Log stream of {} ended", id);
        });
    }

    /// Write one message through the file store, lazily creating the
    /// container's log file on first sight. Messages without a project
    /// bucket are dropped.
    pub fn write_message(&self, message: &LogMessage) -> Result<()> {
        let id = &message.container.id;

        if !self.files.contains(id) {
            let meta = self.extractor.extract(&message.container);
            if meta.project.is_empty() {
                warn!(
                    "Dropping message from {}: no project label",
                    message.container.display_name()
                );
                return Ok(());
            }
            let dir = constants::container_dir(&self.config.root, &meta);
            let file = LogFile::create(dir, constants::STREAM_FILE, self.rotate_size)?;
            self.files.insert(id.clone(), file);
        }

        let rendered = self.template.render(message);
        if !self.files.write(id, rendered.as_bytes())? {
            debug!("Log file for {} vanished, dropping message", id);
        }
        Ok(())
    }

    /// Run the event listener and the stream multiplexer until the
    /// multiplexer stops. The multiplexer's error, if any, is the
    /// adapter's error.
    ///
    /// A fatal write error stops only the multiplexer; the listener and
    /// any in-flight cleanup tasks keep running for as long as the
    /// process lives.
    pub async fn run(&self) -> Result<()> {
        let events = self.runtime.events().await?;
        let (msg_tx, msg_rx) = mpsc::channel(1024);

        for id in self.runtime.list_running().await? {
            self.spawn_pump(id, msg_tx.clone());
        }

        tokio::spawn(listener::listen(self.clone(), events, msg_tx));
        stream::run(self.clone(), msg_rx).await
    }

    /// Close every open log file (adapter teardown)
    pub fn shutdown(&self) {
        info!("Closing all log files");
        self.files.close_all();
    }

    pub fn runtime(&self) -> &Arc<dyn ContainerRuntime> {
        &self.runtime
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    pub fn registry(&self) -> &ContainerRegistry {
        &self.registry
    }

    pub fn files(&self) -> &FileStore {
        &self.files
    }

    pub fn grace(&self) -> Duration {
        self.grace
    }
}
