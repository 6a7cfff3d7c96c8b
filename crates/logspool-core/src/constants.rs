//! Constants and default values for logspool

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::types::ContainerMeta;

/// Size at which a log file is rotated (20 MiB)
pub const ROTATE_SIZE: u64 = 20 * 1024 * 1024;

/// Delay between a destroy event and the cleanup collision check
pub const GRACE_PERIOD: Duration = Duration::from_secs(30);

/// File name used for a container's log stream
pub const STREAM_FILE: &str = "stdout";

/// Default root directory for container log directories
pub const DEFAULT_ROOT: &str = "/var/log/logspool";

/// Default Docker endpoint (overridable via DOCKER_HOST)
pub const DEFAULT_ENDPOINT: &str = "unix:///var/run/docker.sock";

/// Default container environment variable selecting the store bucket
pub const DEFAULT_STORE_KEY: &str = "LOGSPOOL_STORE";

/// Default container label selecting the project bucket
pub const DEFAULT_PROJECT_LABEL: &str = "com.docker.compose.project";

/// Message render template
pub const DEFAULT_TEMPLATE: &str = "{data}\n";

/// Get the log directory for a container
///
/// Layout is `<root>/<project>/<store>/<name>`; an empty store collapses
/// into the parent segment.
pub fn container_dir(root: &Path, meta: &ContainerMeta) -> PathBuf {
    let mut dir = root.join(&meta.project);
    if !meta.store.is_empty() {
        dir.push(&meta.store);
    }
    dir.push(&meta.name);
    dir
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_dir() {
        let meta = ContainerMeta {
            project: "shop".to_string(),
            store: "orders".to_string(),
            name: "web-1".to_string(),
        };
        let dir = container_dir(Path::new("/var/log/logspool"), &meta);
        assert_eq!(dir, PathBuf::from("/var/log/logspool/shop/orders/web-1"));
    }

    #[test]
    fn test_container_dir_empty_store_collapses() {
        let meta = ContainerMeta {
            project: "shop".to_string(),
            store: String::new(),
            name: "web-1".to_string(),
        };
        let dir = container_dir(Path::new("/logs"), &meta);
        assert_eq!(dir, PathBuf::from("/logs/shop/web-1"));
    }

}
