//! CLI module containing argument parsing and configuration file loading

pub mod args;
pub mod config;
pub mod validation;
