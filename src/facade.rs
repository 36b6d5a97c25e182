//! Bridge from the [`log`] facade
//!
//! Records from libraries using `log` become messages of a [`Logger`]:
//! `trace` maps to `debug`, `debug` to `verbose`, the rest keep their names.
//! The record target becomes a tag and `file:line` the call site. Levels
//! missing from the active style fall back to its default level.

use crate::core::{Arg, Derivation, Logger, LoggerError, Result};
use std::path::Path;

pub struct LogBridge {
    root: Derivation,
}

impl LogBridge {
    pub fn new(logger: &Logger) -> Self {
        Self {
            root: logger.root(),
        }
    }

    /// Install a bridge to `logger` as the `log` crate's global logger
    pub fn install(logger: &Logger) -> Result<()> {
        log::set_boxed_logger(Box::new(Self::new(logger)))
            .map_err(|_| LoggerError::AlreadyInitialized)?;
        log::set_max_level(log::LevelFilter::Trace);
        Ok(())
    }

    fn index_for(&self, level: log::Level) -> usize {
        let style = self.root.logger().style();
        style
            .index_of(level_name(level))
            .unwrap_or_else(|| style.default_index())
    }
}

/// Route `log` records to `logger`; shorthand for [`LogBridge::install`]
pub fn install(logger: &Logger) -> Result<()> {
    LogBridge::install(logger)
}

fn level_name(level: log::Level) -> &'static str {
    match level {
        log::Level::Trace => "debug",
        log::Level::Debug => "verbose",
        log::Level::Info => "info",
        log::Level::Warn => "warn",
        log::Level::Error => "error",
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, _: &log::Metadata<'_>) -> bool {
        // Thresholds are applied per sink at dispatch
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        let call_site = match (record.file(), record.line()) {
            (Some(file), Some(line)) => {
                let file = Path::new(file)
                    .file_name()
                    .and_then(|name| name.to_str())
                    .unwrap_or(file);
                Some(format!("{}:{}", file, line))
            }
            _ => None,
        };

        let derivation = match record.target() {
            "" => self.root.clone(),
            target => self.root.tag(target),
        };
        derivation.emit_at(
            self.index_for(record.level()),
            vec![Arg::Text(record.args().to_string())],
            call_site,
        );
    }

    fn flush(&self) {
        if let Err(e) = self.root.logger().flush() {
            eprintln!("[LOGGER ERROR] {}", e);
        }
    }
}
