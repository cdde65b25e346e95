//! Logging setup
//!
//! Installs a `tracing` fmt subscriber filtered by `RUST_LOG`, falling back
//! to the directive given by the caller.

use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Default directive when `RUST_LOG` is unset.
pub const DEFAULT_LOG_DIRECTIVE: &str = "pestwatch=info";

/// Installs the global subscriber. Fails if one is already installed.
///
/// Call once at startup, before the first dashboard refresh:
///
/// ```no_run
/// use pestwatch::utils::telemetry::{init_logging, DEFAULT_LOG_DIRECTIVE};
///
/// fn main() -> anyhow::Result<()> {
///     init_logging(DEFAULT_LOG_DIRECTIVE)?;
///     Ok(())
/// }
/// ```
pub fn init_logging(default_directive: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    Registry::default()
        .with(filter)
        .with(fmt::layer().with_target(true).with_line_number(true))
        .try_init()
        .map_err(|e| anyhow!("Failed to install tracing subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails() {
        // Another test may have installed a subscriber first; either way the
        // last of two calls must fail.
        let _ = init_logging(DEFAULT_LOG_DIRECTIVE);
        assert!(init_logging(DEFAULT_LOG_DIRECTIVE).is_err());
    }
}
