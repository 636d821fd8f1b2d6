//! File-backed tracing setup. The terminal belongs to the UI, so logs go to
//! a file instead of stderr.

use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

/// Installs a global subscriber writing to `path`.
///
/// `RUST_LOG` wins over `default_filter`. Returns `Ok` without replacing
/// anything if a subscriber is already installed.
pub fn init_file_logging(path: &Path, default_filter: &str) -> std::io::Result<()> {
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    Ok(())
}
