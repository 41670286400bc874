//! Public API for the queue system
//!
//! External modules should import from here rather than directly from internal modules.
//! See module documentation for complete usage examples and architecture details.

// Core queue components
pub use crate::queue::controller::AsyncQueue;
pub use crate::queue::receiver::QueueReceiver;

// Configuration
pub use crate::queue::config::QueueConfig;

// Error handling
pub use crate::queue::error::{QueueError, QueueResult, RecvError};

// Statistics
pub use crate::queue::types::QueueStats;
