//! Core services and infrastructure

pub mod logging;
