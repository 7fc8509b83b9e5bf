use mta_dns_domain::{DomainError, LoggingConfig};
use tracing_subscriber::EnvFilter;

/// Installs the global fmt subscriber. `RUST_LOG` takes precedence over the
/// configured level. Calling this again once a subscriber is set is a no-op.
pub fn init_logging(config: &LoggingConfig) -> Result<(), DomainError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| {
            DomainError::ConfigError(format!("Invalid log level '{}': {}", config.level, e))
        })?,
    };

    // Fails only when a global subscriber already exists.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .try_init();

    Ok(())
}
