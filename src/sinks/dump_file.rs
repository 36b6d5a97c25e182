//! Plain-text dump file, same layout as the console without styling

use super::open_append;
use crate::core::{Formatter, LevelDefinition, LoggerError, Message, Result, Sink, Target};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct DumpFileSink {
    writer: BufWriter<File>,
}

impl DumpFileSink {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = open_append(path.as_ref(), "dump file")?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl Sink for DumpFileSink {
    fn write(
        &mut self,
        message: &Message,
        level: &LevelDefinition,
        formatter: &Formatter,
    ) -> Result<()> {
        let output = formatter.format(message, level, Target::Plain);
        self.writer
            .write_all(output.as_bytes())
            .and_then(|()| self.writer.flush())
            .map_err(|e| LoggerError::sink_write("dump file", e))
    }

    fn flush(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| LoggerError::sink_write("dump file", e))
    }

    fn name(&self) -> &str {
        "dump_file"
    }
}

impl Drop for DumpFileSink {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.flush();
    }
}
