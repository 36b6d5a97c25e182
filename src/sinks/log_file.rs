//! Structured log file: one JSON record per line

use super::open_append;
use crate::core::{Formatter, LevelDefinition, LogRecord, LoggerError, Message, Result, Sink};
use std::fs::File;
use std::io::{LineWriter, Write};
use std::path::{Path, PathBuf};

pub struct LogFileSink {
    writer: LineWriter<File>,
    path: PathBuf,
}

impl LogFileSink {
    /// Open (or create) `path` for appending
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = open_append(&path, "log file")?;
        Ok(Self {
            writer: LineWriter::new(file),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for LogFileSink {
    fn write(&mut self, message: &Message, _: &LevelDefinition, _: &Formatter) -> Result<()> {
        let mut line = LogRecord::from_message(message).to_json()?;
        line.push('\n');

        self.writer
            .write_all(line.as_bytes())
            .map_err(|e| LoggerError::sink_write("log file", e))
    }

    fn flush(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| LoggerError::sink_write("log file", e))
    }

    fn name(&self) -> &str {
        "log_file"
    }
}

impl Drop for LogFileSink {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
