//! Diagnostic logging
//!
//! Structured diagnostics go to stderr through `tracing`. Verdict and step
//! lines for the operator are printed separately by [`crate::output`].

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub log_level: String,
    /// Include the event target in each line
    pub show_target: bool,
    /// Emit ANSI colors
    pub ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            show_target: false,
            ansi: true,
        }
    }
}

impl LogConfig {
    /// Derive the default level from a `-v` count
    pub fn from_verbosity(verbose: u8) -> Self {
        Self {
            log_level: level_for_verbosity(verbose).to_string(),
            show_target: verbose >= 3,
            ..Self::default()
        }
    }
}

/// Map a `-v` count to a filter directive
pub fn level_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize the global subscriber.
///
/// `RUST_LOG` wins over the configured level. Calling this twice is harmless:
/// the second call reports the error and keeps the first subscriber.
pub fn init(config: &LogConfig) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(config.show_target)
                .with_ansi(config.ansi)
                .compact(),
        )
        .try_init()?;

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "logging initialized");
    Ok(())
}
