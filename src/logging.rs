//! Logging setup for the `w3a` binary.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the application. This helper installs a compact stderr formatter
//! filtered by `RUST_LOG`, falling back to the given default directive.

use crate::error::CodecError;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs the global subscriber.
///
/// # Errors
///
/// Returns [`CodecError::Config`] if the default directive does not parse
/// or a global subscriber is already set.
pub fn init_logging(default_directive: &str) -> Result<(), CodecError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .map_err(|e| CodecError::Config(e.to_string()))?;

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| CodecError::Config(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails() {
        let first = init_logging("warn");
        let second = init_logging("warn");

        assert!(first.is_ok());
        assert!(matches!(second, Err(CodecError::Config(_))));
    }
}
