//! Structured logging setup.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Errors returned while installing the log subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The filter directive could not be parsed.
    #[error("invalid log filter '{directive}': {source}")]
    Filter {
        /// Directive that failed to parse.
        directive: String,
        /// Parser error.
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    /// A global subscriber is already installed.
    #[error("failed to install log subscriber: {0}")]
    Install(String),
}

/// Installs a formatted `tracing` subscriber as the global default.
///
/// `RUST_LOG` takes precedence over `filter` when it is set and valid.
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] for an invalid directive and
/// [`TelemetryError::Install`] when a subscriber is already installed.
pub fn init(filter: &str) -> Result<(), TelemetryError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(from_env) => from_env,
        Err(_) => EnvFilter::try_new(filter).map_err(|source| TelemetryError::Filter {
            directive: filter.to_owned(),
            source,
        })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init()
        .map_err(|err| TelemetryError::Install(err.to_string()))
}
