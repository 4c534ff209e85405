//! Log subscriber setup.

use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use color_eyre::eyre::eyre;
use neurofolio_config::log_path;
use tracing_subscriber::{EnvFilter, fmt};

/// `RUST_LOG`, or `info` when unset or invalid.
fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Log to stderr.
pub fn init_stderr() {
    // Only fails if a subscriber is already set.
    let _ = fmt()
        .with_env_filter(filter())
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .try_init();
}

/// Log to a file in the platform data directory. Nothing is logged when
/// the platform has no such directory.
pub fn init_file() -> color_eyre::Result<()> {
    let Some(path) = log_path() else {
        return Ok(());
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    fmt()
        .with_env_filter(filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| eyre!("failed to install logger: {err}"))
}
