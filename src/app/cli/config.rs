//! TOML configuration file parsing and loading
//!
//! This module handles loading of the soak-test configuration file,
//! including default config file discovery and validation of values.
//!
//! ```toml
//! producers = 8
//! consumers = 2
//! items = 50000
//! batch = 16
//!
//! [queue]
//! channel-capacity = 32
//! buffer-capacity = 64
//! ```

use crate::app::cli::args::Args;
use crate::app::cli::validation::validate_positive_toml_int;
use crate::app::error::{AppError, AppResult};
use crate::app::soak::SoakSettings;
use crate::queue::QueueConfig;
use std::path::{Path, PathBuf};

/// Default configuration file location, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("asyncqueue").join("asyncqueue.toml"))
}

/// Load the configuration file
///
/// A file named on the command line must exist. Without one, the default
/// location is used when present and silently skipped otherwise.
pub fn load_config_file(config_file: Option<&Path>) -> AppResult<Option<toml::Table>> {
    let config_path = match config_file {
        Some(path) => {
            if !path.exists() {
                return Err(AppError::ConfigNotFound {
                    path: path.to_path_buf(),
                });
            }
            path.to_path_buf()
        }
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(None),
        },
    };

    log::debug!("Loading configuration from {}", config_path.display());
    let contents = std::fs::read_to_string(&config_path).map_err(|source| AppError::ConfigRead {
        path: config_path.clone(),
        source,
    })?;
    let table = toml::from_str::<toml::Table>(&contents).map_err(|source| AppError::ConfigParse {
        path: config_path,
        source,
    })?;
    Ok(Some(table))
}

impl Args {
    /// Apply TOML configuration values to soak settings
    pub fn apply_toml_values(settings: &mut SoakSettings, config: &toml::Table) -> AppResult<()> {
        let counts: [(&str, &mut usize); 4] = [
            ("producers", &mut settings.producers),
            ("consumers", &mut settings.consumers),
            ("items", &mut settings.items),
            ("batch", &mut settings.batch),
        ];
        for (key, target) in counts {
            if let Some(value) = config.get(key) {
                *target = validate_positive_toml_int(value).map_err(|reason| {
                    AppError::InvalidValue {
                        key: key.to_string(),
                        reason,
                    }
                })?;
            }
        }

        if let Some(queue_value) = config.get("queue") {
            let queue: QueueConfig =
                queue_value
                    .clone()
                    .try_into()
                    .map_err(|e: toml::de::Error| AppError::InvalidValue {
                        key: "queue".to_string(),
                        reason: e.to_string(),
                    })?;
            settings.queue = queue;
        }

        Ok(())
    }
}
