pub mod app;
pub mod core;
pub mod queue;

include!(concat!(env!("OUT_DIR"), "/version.rs"));

/// Version string shown by `asyncqueue --version`
pub fn long_version() -> String {
    format!(
        "{} (git {}, built {})",
        env!("CARGO_PKG_VERSION"),
        GIT_HASH,
        BUILD_TIME
    )
}
