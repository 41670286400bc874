//! Command line arguments for the soak-test binary
//!
//! Every tuning flag is optional so that values from the TOML
//! configuration file can fill the gaps; flags given on the command line
//! always win.

use crate::app::cli::validation::validate_positive_int;
use crate::app::error::AppResult;
use crate::app::soak::SoakSettings;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "asyncqueue")]
#[command(about = "Soak test for the asyncqueue producer/consumer queue")]
#[command(version, long_version = crate::long_version())]
pub struct Args {
    /// Number of concurrent producers
    #[arg(short = 'P', long = "producers", value_name = "COUNT", value_parser = validate_positive_int)]
    pub producers: Option<usize>,

    /// Number of competing consumers
    #[arg(short = 'C', long = "consumers", value_name = "COUNT", value_parser = validate_positive_int)]
    pub consumers: Option<usize>,

    /// Items added by each producer
    #[arg(short = 'n', long = "items", value_name = "COUNT", value_parser = validate_positive_int)]
    pub items: Option<usize>,

    /// Items passed to each add call
    #[arg(short = 'b', long = "batch", value_name = "COUNT", value_parser = validate_positive_int)]
    pub batch: Option<usize>,

    /// Delivery channel capacity
    #[arg(long = "channel-capacity", value_name = "SLOTS", value_parser = validate_positive_int)]
    pub channel_capacity: Option<usize>,

    /// Initial ring buffer capacity
    #[arg(long = "buffer-capacity", value_name = "SLOTS", value_parser = validate_positive_int)]
    pub buffer_capacity: Option<usize>,

    /// Configuration file path
    #[arg(short = 'c', long = "config-file", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Log level
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = ["trace", "debug", "info", "warn", "error", "off"])]
    pub log_level: Option<String>,

    /// Log format
    #[arg(short = 'o', long = "log-format", value_name = "FORMAT", value_parser = ["text", "ext", "json"])]
    pub log_format: Option<String>,

    /// Log file path
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Force colored output
    #[arg(long = "color")]
    pub color: bool,

    /// Disable colored output
    #[arg(long = "no-color", conflicts_with = "color")]
    pub no_color: bool,
}

impl Args {
    /// Combine defaults, configuration file values and flags
    pub fn resolve(&self, config: Option<&toml::Table>) -> AppResult<SoakSettings> {
        let mut settings = SoakSettings::default();
        if let Some(table) = config {
            Self::apply_toml_values(&mut settings, table)?;
        }

        if let Some(producers) = self.producers {
            settings.producers = producers;
        }
        if let Some(consumers) = self.consumers {
            settings.consumers = consumers;
        }
        if let Some(items) = self.items {
            settings.items = items;
        }
        if let Some(batch) = self.batch {
            settings.batch = batch;
        }
        if let Some(capacity) = self.channel_capacity {
            settings.queue.channel_capacity = capacity;
        }
        if let Some(capacity) = self.buffer_capacity {
            settings.queue.buffer_capacity = capacity;
        }

        settings.queue.validate()?;
        Ok(settings)
    }

    /// Whether to colorize output, honouring explicit flags over TTY detection
    pub fn use_color(&self) -> bool {
        use std::io::IsTerminal;

        (self.color || std::io::stdout().is_terminal()) && !self.no_color
    }
}
