//! Tracing subscriber initialization.

use crate::LoggingConfig;
use tessera_core::{TesseraError, TesseraResult};
use tracing_subscriber::EnvFilter;

/// Initializes the global tracing subscriber from logging configuration.
///
/// The `RUST_LOG` environment variable takes precedence over the configured
/// level. Returns an error if a subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> TesseraResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| TesseraError::Configuration(format!("Invalid log filter: {}", e)))?;

    let result = if config.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init()
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).try_init()
    };

    result.map_err(|e| TesseraError::Configuration(format!("Failed to init tracing: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_accepts_valid_level() {
        let config = LoggingConfig {
            level: "debug".to_string(),
            json: false,
        };
        // First call installs the subscriber; a second call in the same
        // process reports an error instead of panicking.
        let first = init_tracing(&config);
        let second = init_tracing(&config);
        assert!(first.is_ok() || second.is_err());
    }
}
