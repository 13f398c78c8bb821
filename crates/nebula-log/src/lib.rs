//! Structured logging for the web UI host.
//!
//! Installs a `tracing` subscriber with an environment-aware filter, a console
//! layer with module paths and uptime timestamps, and an optional JSON file
//! layer. `log` records from crates that use the `log` facade are bridged in.

use std::fs::File;
use std::sync::Mutex;

use nebula_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config provide one.
pub const DEFAULT_FILTER: &str = "info";

/// Errors from logging setup.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// The JSON log file could not be created.
    #[error("failed to create log file: {0}")]
    LogFile(#[source] std::io::Error),

    /// A global subscriber is already installed.
    #[error("logging already initialized: {0}")]
    AlreadyInitialized(#[source] tracing_subscriber::util::TryInitError),
}

/// Build the filter for a config: `RUST_LOG` wins, then `debug.log_level`,
/// then [`DEFAULT_FILTER`].
pub fn env_filter_for(config: &Config) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    filter_from_level(&config.debug.log_level)
}

fn filter_from_level(level: &str) -> EnvFilter {
    if level.trim().is_empty() {
        return default_env_filter();
    }
    EnvFilter::try_new(level).unwrap_or_else(|_| default_env_filter())
}

/// Create an `EnvFilter` with the default filter string.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}

/// Install the global subscriber described by `config`.
///
/// Console output always; JSON lines to `debug.log_file` when set.
pub fn init_logging(config: &Config) -> Result<(), LogError> {
    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_names(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let file_layer = match &config.debug.log_file {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent).map_err(LogError::LogFile)?;
            }
            let file = File::create(path).map_err(LogError::LogFile)?;
            Some(
                fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_target(true)
                    .with_timer(fmt::time::uptime())
                    .json(),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter_for(config))
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(LogError::AlreadyInitialized)
}
