//! Queue configuration
//!
//! Holds the two sizing constants of a queue (initial ring buffer slots and
//! delivery channel capacity) plus the pump thread name. Values can be built
//! in code or loaded from a TOML document with kebab-case keys:
//!
//! ```toml
//! buffer-capacity = 64
//! channel-capacity = 32
//! pump-thread-name = "ingest-pump"
//! ```

use crate::queue::error::{QueueError, QueueResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default initial ring buffer slot count
pub const DEFAULT_BUFFER_CAPACITY: usize = 16;

/// Default delivery channel capacity
pub const DEFAULT_CHANNEL_CAPACITY: usize = 16;

/// Default OS thread name for the pump
pub const DEFAULT_PUMP_THREAD_NAME: &str = "asyncqueue-pump";

/// Sizing and naming options for an [`AsyncQueue`](crate::queue::AsyncQueue)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct QueueConfig {
    /// Initial ring buffer slots; the buffer doubles on demand
    pub buffer_capacity: usize,
    /// Delivery channel capacity
    pub channel_capacity: usize,
    /// Name given to the pump thread
    pub pump_thread_name: String,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            pump_thread_name: DEFAULT_PUMP_THREAD_NAME.to_string(),
        }
    }
}

impl QueueConfig {
    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }

    pub fn with_pump_thread_name(mut self, name: impl Into<String>) -> Self {
        self.pump_thread_name = name.into();
        self
    }

    /// Check that the configuration can drive a queue
    ///
    /// A zero-capacity delivery channel would leave both the fast path and
    /// the pump without anywhere to put items, so it is rejected.
    pub fn validate(&self) -> QueueResult<()> {
        if self.buffer_capacity == 0 {
            return Err(QueueError::InvalidConfig {
                field: "buffer-capacity",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.channel_capacity == 0 {
            return Err(QueueError::InvalidConfig {
                field: "channel-capacity",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.pump_thread_name.trim().is_empty() {
            return Err(QueueError::InvalidConfig {
                field: "pump-thread-name",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(contents: &str) -> QueueResult<Self> {
        let config: Self = toml::from_str(contents).map_err(|source| QueueError::ConfigParse {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> QueueResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| QueueError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&contents).map_err(|source| QueueError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = QueueConfig::default();

        assert_eq!(config.buffer_capacity, 16);
        assert_eq!(config.channel_capacity, 16);
        assert_eq!(config.pump_thread_name, "asyncqueue-pump");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_methods() {
        let config = QueueConfig::default()
            .with_buffer_capacity(4)
            .with_channel_capacity(2)
            .with_pump_thread_name("test-pump");

        assert_eq!(config.buffer_capacity, 4);
        assert_eq!(config.channel_capacity, 2);
        assert_eq!(config.pump_thread_name, "test-pump");
    }

    #[test]
    fn test_zero_channel_capacity_rejected() {
        let config = QueueConfig::default().with_channel_capacity(0);

        match config.validate() {
            Err(QueueError::InvalidConfig { field, .. }) => {
                assert_eq!(field, "channel-capacity");
            }
            other => panic!("Expected InvalidConfig error, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_buffer_capacity_rejected() {
        let config = QueueConfig::default().with_buffer_capacity(0);

        assert!(matches!(
            config.validate(),
            Err(QueueError::InvalidConfig {
                field: "buffer-capacity",
                ..
            })
        ));
    }

    #[test]
    fn test_blank_thread_name_rejected() {
        let config = QueueConfig::default().with_pump_thread_name("  ");

        assert!(matches!(
            config.validate(),
            Err(QueueError::InvalidConfig {
                field: "pump-thread-name",
                ..
            })
        ));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = QueueConfig::from_toml_str("channel-capacity = 32").unwrap();

        assert_eq!(config.channel_capacity, 32);
        assert_eq!(config.buffer_capacity, DEFAULT_BUFFER_CAPACITY);
        assert_eq!(config.pump_thread_name, DEFAULT_PUMP_THREAD_NAME);
    }

    #[test]
    fn test_unknown_toml_key_rejected() {
        let result = QueueConfig::from_toml_str("channel-size = 32");

        assert!(matches!(result, Err(QueueError::ConfigParse { .. })));
    }

    #[test]
    fn test_toml_values_are_validated() {
        let result = QueueConfig::from_toml_str("buffer-capacity = 0");

        assert!(matches!(result, Err(QueueError::InvalidConfig { .. })));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "buffer-capacity = 8\nchannel-capacity = 4\npump-thread-name = \"file-pump\""
        )
        .unwrap();

        let config = QueueConfig::from_file(file.path()).unwrap();

        assert_eq!(config.buffer_capacity, 8);
        assert_eq!(config.channel_capacity, 4);
        assert_eq!(config.pump_thread_name, "file-pump");
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");

        match QueueConfig::from_file(&missing) {
            Err(QueueError::ConfigRead { path, .. }) => assert_eq!(path, missing),
            other => panic!("Expected ConfigRead error, got {:?}", other),
        }
    }
}
