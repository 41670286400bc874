//! Queue Error Types

use std::path::PathBuf;

/// Errors raised while building a queue
///
/// `add`, `next` and `close` never fail; only construction and
/// configuration loading report errors.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("Invalid queue configuration: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("Failed to spawn pump thread: {source}")]
    PumpSpawn {
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read configuration file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Result type for queue construction
pub type QueueResult<T> = Result<T, QueueError>;

/// Why a non-blocking or timed receive returned without an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RecvError {
    #[error("No item is currently available")]
    Empty,

    #[error("Timed out waiting for an item")]
    Timeout,

    #[error("Queue is closed and fully drained")]
    Closed,
}
