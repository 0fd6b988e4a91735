//! Logging setup for programs embedding the client

use crate::{Error, Result, config::LoggingSettings};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a global stderr subscriber.
///
/// `RUST_LOG` wins when set; otherwise the configured level is used, or
/// `debug` in verbose mode. Fails if a global subscriber is already installed.
pub fn init_logging(settings: &LoggingSettings) -> Result<()> {
    let default_level = if settings.verbose {
        "debug"
    } else {
        settings.level.as_str()
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| Error::config(format!("Failed to initialize logging: {}", e)))
}
