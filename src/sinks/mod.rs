//! Sink implementations

pub mod console;
pub mod dump_file;
pub mod log_file;

pub use console::ConsoleSink;
pub use dump_file::DumpFileSink;
pub use log_file::LogFileSink;

pub use crate::core::Sink;

use crate::core::{LoggerError, Result};
use std::fs::{File, OpenOptions};
use std::path::Path;

/// Open `path` for appending, creating it owner-readable only if missing
pub(crate) fn open_append(path: &Path, sink: &str) -> Result<File> {
    let mut options = OpenOptions::new();
    options.create(true).append(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    options
        .open(path)
        .map_err(|e| LoggerError::sink_open(sink, path.display().to_string(), e))
}
