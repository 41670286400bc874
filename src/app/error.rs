//! Application error types

use crate::queue::QueueError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("The specified configuration file does not exist: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("Error reading configuration file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing configuration file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for '{key}' in configuration file: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error(transparent)]
    Queue(#[from] QueueError),

    #[error("Soak task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}

pub type AppResult<T> = Result<T, AppError>;
