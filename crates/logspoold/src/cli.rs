//! Command-line and environment configuration

use std::path::PathBuf;

use clap::Parser;
use logspool_core::{constants, AdapterConfig, Result};

/// Ships container logs to per-container files
#[derive(Parser, Debug)]
#[command(name = "logspoold", version)]
pub struct Cli {
    /// Root directory under which container log directories are created
    #[arg(long, env = "LOGSPOOL_ROOT", default_value = constants::DEFAULT_ROOT)]
    pub root: PathBuf,

    /// Container runtime endpoint (unix:// socket)
    #[arg(long, env = "DOCKER_HOST", default_value = constants::DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Container environment variable selecting the store bucket
    #[arg(long, env = "LOGSPOOL_STORE_KEY", default_value = constants::DEFAULT_STORE_KEY)]
    pub store_key: String,

    /// Container label selecting the project bucket
    #[arg(
        long,
        env = "LOGSPOOL_PROJECT_LABEL",
        default_value = constants::DEFAULT_PROJECT_LABEL
    )]
    pub project_label: String,

    /// Write-path failure behavior: fail-fast or isolate
    #[arg(long, env = "LOGSPOOL_FAILURE_MODE", default_value = "fail-fast")]
    pub failure_mode: String,
}

impl Cli {
    /// Convert parsed arguments into an adapter configuration
    pub fn into_config(self) -> Result<AdapterConfig> {
        let failure_mode = self.failure_mode.parse()?;
        Ok(AdapterConfig::new(self.root)
            .with_endpoint(self.endpoint)
            .with_store_key(self.store_key)
            .with_project_label(self.project_label)
            .with_failure_mode(failure_mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logspool_core::FailureMode;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["logspoold"]);
        let config = cli.into_config().unwrap();
        assert_eq!(config.root, PathBuf::from(constants::DEFAULT_ROOT));
        assert_eq!(config.store_key, constants::DEFAULT_STORE_KEY);
        assert_eq!(config.failure_mode, FailureMode::FailFast);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from([
            "logspoold",
            "--root",
            "/data/logs",
            "--endpoint",
            "unix:///tmp/docker.sock",
            "--failure-mode",
            "isolate",
        ]);
        let config = cli.into_config().unwrap();
        assert_eq!(config.root, PathBuf::from("/data/logs"));
        assert_eq!(config.endpoint, "unix:///tmp/docker.sock");
        assert_eq!(config.failure_mode, FailureMode::Isolate);
    }

    #[test]
    fn test_invalid_failure_mode() {
        let cli = Cli::parse_from(["logspoold", "--failure-mode", "retry"]);
        assert!(cli.into_config().is_err());
    }
}
