//! Tracing subscriber setup
//!
//! Logs always go to stderr so stdout carries nothing but the drafted email.

use super::toml_config::{LogFormat, LoggingConfig};
use std::io::Write;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Flushes stderr when dropped. Hold it for the lifetime of `main`.
#[must_use = "logs may be lost if the guard is dropped early"]
pub struct LoggingGuard {
    _private: (),
}

impl Drop for LoggingGuard {
    fn drop(&mut self) {
        let _ = std::io::stderr().flush();
    }
}

/// Build the filter: `RUST_LOG` wins, then `--verbose`, then the configured level.
pub fn build_filter(config: &LoggingConfig, verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { config.level.as_str() };
        EnvFilter::new(format!("workorder={level},warn"))
    })
}

/// Install the global subscriber.
///
/// Calling this more than once is harmless; later calls keep the first
/// subscriber.
pub fn init_logging(config: &LoggingConfig, verbose: bool) -> LoggingGuard {
    let filter = build_filter(config, verbose);

    let result = match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    if result.is_err() {
        tracing::debug!("Global subscriber already installed");
    }

    LoggingGuard { _private: () }
}
