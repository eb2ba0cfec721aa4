//! Logging utilities for sql_diff
//!
//! This module provides logging setup for the binary; the library itself
//! never installs a subscriber.

use tracing_subscriber::{fmt, EnvFilter};

use crate::error::Result;

/// Initialize logging to stderr
///
/// Respects `RUST_LOG` when set; otherwise filters at info, or debug when
/// `verbose` is given.
pub fn init_logging(verbose: bool) -> Result<()> {
    let default_directive = if verbose {
        "sql_diff=debug"
    } else {
        "sql_diff=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| crate::error::Error::Unknown(e.to_string()))?;

    Ok(())
}
