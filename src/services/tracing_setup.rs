//! Global tracing subscriber for the binaries

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "structural_editor=debug";

/// Log to `log_file`. Returns an error when the file cannot be created; a
/// subscriber that is already installed is left in place.
pub fn init_global(log_file: &Path) -> anyhow::Result<()> {
    let file = File::create(log_file)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing subscriber already installed");
    }
    Ok(())
}

/// Default log location in the system temp dir
pub fn default_log_file(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("{name}.log"))
}
