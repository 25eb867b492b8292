//! Tracing setup for the devcap CLI
//!
//! Usage:
//!   devcap serve                      # Level from LOG_LEVEL (default: info)
//!   RUST_LOG=devcap_server=debug devcap serve
//!
//! Logs go to stderr. Production writes JSON lines, everything else the
//! compact human format.

use anyhow::{anyhow, Result};
use devcap_server::config::{Config, Environment, LogLevel};
use tracing_subscriber::EnvFilter;

/// Tracing configuration options
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingConfig {
    /// Used when RUST_LOG is unset
    pub level: LogLevel,
    /// Emit JSON lines instead of the compact format
    pub json: bool,
}

impl From<&Config> for TracingConfig {
    fn from(config: &Config) -> Self {
        Self {
            level: config.log_level,
            json: config.environment == Environment::Production,
        }
    }
}

fn filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()))
}

/// Initialize the global subscriber.
pub fn init(config: &TracingConfig) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter(config.level))
        .with_writer(std::io::stderr);

    if config.json {
        builder
            .json()
            .with_current_span(false)
            .try_init()
            .map_err(|err| anyhow!(err))
    } else {
        builder
            .with_target(false)
            .compact()
            .try_init()
            .map_err(|err| anyhow!(err))
    }
}
