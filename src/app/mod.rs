//! Application module: the `asyncqueue` soak-test binary

pub mod cli;
pub mod error;
pub mod soak;
pub mod startup;
