pub mod config;
pub mod error;
pub mod event;
pub mod model;
pub mod pipeline;
pub mod screen;
pub mod screener;
pub mod simulator;
pub mod source;
pub mod store;

use tracing_subscriber::EnvFilter;

/// Initialize tracing with the configured level, overridable via RUST_LOG.
/// Safe to call once per process; embedding shells that install their own
/// subscriber should skip it.
pub fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
