//! Logging setup.
//!
//! The terminal belongs to the game screen, so log records go to a file
//! instead of stderr. `RUST_LOG` overrides the configured level.

use env_logger::{Builder, Env, Target};
use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

/// Route `log` records to `path`, replacing the previous session's log.
/// Fails if the file can't be opened or a logger is already installed.
pub fn init_file_logger(path: &Path, default_level: &str) -> io::Result<()> {
    let file = open_log_file(path)?;

    Builder::from_env(Env::default().default_filter_or(default_level))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e))
}

/// Open `path` for writing, truncated.
fn open_log_file(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
}
