//! Error types for logspool

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Template error: {0}")]
    TemplateError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Runtime error: {0}")]
    RuntimeError(String),

    #[error("Inspect failed for container {0}")]
    InspectFailed(String),

    #[error("Invalid failure mode: {0}")]
    InvalidFailureMode(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for logspool
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn template<S: Into<String>>(msg: S) -> Self {
        Error::TemplateError(msg.into())
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::ConfigError(msg.into())
    }

    pub fn runtime<S: Into<String>>(msg: S) -> Self {
        Error::RuntimeError(msg.into())
    }
}
