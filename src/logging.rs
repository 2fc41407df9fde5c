//! Log output for the terminal host.
//!
//! The terminal is in raw alternate-screen mode while the game runs, so log
//! records go to a file instead of stderr. The level comes from `RUST_LOG`
//! and defaults to `info`.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to open log file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("logger already installed: {0}")]
    Install(#[from] log::SetLoggerError),
}

/// Install the global logger writing to `path` (truncated on start).
pub fn init(path: &Path) -> Result<(), LoggingError> {
    let file = File::create(path).map_err(|source| LoggingError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()?;

    log::info!("Logging to {}", path.display());
    Ok(())
}
