//! Shared logging setup for tools embedding the persistence layer.
//!
//! The write and read paths emit `tracing` events (sink opens, header
//! writes, close); this helper gives embedding tools one consistent way
//! to subscribe to them.

use crate::{ProfdumpError, Result};

/// Initializes structured logging based on verbosity level.
///
/// # Arguments
/// * `verbose` - Verbosity level (0=INFO, 1=DEBUG, 2+=TRACE)
/// * `quiet` - If true, only show ERROR level logs
pub fn init_logging(verbose: u8, quiet: bool) -> Result<()> {
    let level = match (quiet, verbose) {
        (true, _) => tracing::Level::ERROR,
        (false, 0) => tracing::Level::INFO,
        (false, 1) => tracing::Level::DEBUG,
        (false, _) => tracing::Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init()
        .map_err(|e| {
            ProfdumpError::configuration(format!("Failed to initialize logging: {e}"))
        })?;

    Ok(())
}
