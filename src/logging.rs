//! Subscriber setup for the crate's `tracing` events.

use crate::error::{CayleyError, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// Installs a global fmt subscriber with the supplied filter directive,
/// e.g. `"cayley_client=debug"`.
pub fn init(filter: &str) -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_new(filter)
                .map_err(|e| CayleyError::Config(format!("invalid log filter: {e}")))?,
        )
        .with_target(true)
        .try_init()
        .map_err(|_| CayleyError::Config("logging already initialized".into()))
}
