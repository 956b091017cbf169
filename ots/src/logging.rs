//! Logging setup.
//!
//! The crate only emits `tracing` events. Applications that want them on the
//! console can install a subscriber here or bring their own.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::OtsConfig;
use crate::error::{OtsError, OtsResult};

/// Configuration for logging output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Log level filter. If None, `RUST_LOG` is used, then INFO.
    pub level: Option<LevelFilter>,
    /// Whether to output logs to the console (stderr).
    pub console: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: None,
            console: true,
        }
    }
}

impl LoggingConfig {
    /// Console logging at the level named in `config`.
    pub fn from_config(config: &OtsConfig) -> OtsResult<Self> {
        Ok(LoggingConfig {
            level: config.level_filter()?,
            console: true,
        })
    }

    fn env_filter(&self) -> EnvFilter {
        match self.level {
            Some(level) => EnvFilter::new(level.to_string()),
            None => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(LevelFilter::INFO.to_string())),
        }
    }
}

/// Initialize console-only logging with the given level.
pub fn init_console_logging(level: LevelFilter) -> OtsResult<()> {
    init_logging(LoggingConfig {
        level: Some(level),
        console: true,
    })
}

/// Install a global subscriber for `config`.
///
/// With `console` off nothing is installed and tracing macros stay no-ops.
/// Fails if a global subscriber is already set.
pub fn init_logging(config: LoggingConfig) -> OtsResult<()> {
    if !config.console {
        return Ok(());
    }

    let console_layer =
        fmt::layer().with_target(true).with_thread_ids(false).with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(console_layer)
        .try_init()
        .map_err(|e| OtsError::Logging(e.to_string()))
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
