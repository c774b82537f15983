//! Structured logging setup

use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Initialize JSON tracing output filtered by `service.log_level`.
///
/// An invalid filter falls back to `info`. Only the first call installs a
/// subscriber; later calls are no-ops.
pub fn init_tracing<T>(config: &Config<T>) {
    let log_level = &config.service.log_level;

    let installed = tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("Tracing initialized for service: {}", config.service.name);
    }
}
