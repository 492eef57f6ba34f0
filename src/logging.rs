// SPDX-License-Identifier: MPL-2.0
//! Logging system initialization.
//!
//! Logs go to stderr so they never interleave with the snapshots the demo
//! driver prints on stdout. The filter comes from `--log`, then `RUST_LOG`,
//! then defaults to `warn`.

use crate::error::{Error, Result};
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "warn";

/// Resolves the filter directive: explicit value, `RUST_LOG`, or the default.
fn build_filter(directive: Option<&str>) -> Result<EnvFilter> {
    match directive {
        Some(directive) => {
            EnvFilter::try_new(directive).map_err(|err| Error::Logging(err.to_string()))
        }
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
    }
}

/// Installs the global `tracing` subscriber.
///
/// # Errors
///
/// Returns [`Error::Logging`] if the filter is malformed or a subscriber is
/// already installed.
pub fn init(directive: Option<&str>) -> Result<()> {
    let subscriber = fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(build_filter(directive)?)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|err| Error::Logging(err.to_string()))?;

    tracing::info!("sunshine-gallery v{} started", env!("CARGO_PKG_VERSION"));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_directive_is_accepted() {
        assert!(build_filter(Some("sunshine_gallery=debug")).is_ok());
    }

    #[test]
    fn malformed_directive_is_a_logging_error() {
        match build_filter(Some("sunshine_gallery=notalevel")) {
            Err(Error::Logging(_)) => {}
            other => panic!("expected logging error, got {other:?}"),
        }
    }
}
