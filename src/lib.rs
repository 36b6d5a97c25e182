//! # mulog
//!
//! A small, good-looking logger for command-line programs and services.
//!
//! ## Features
//!
//! - **Chainable handles**: derive tagged, level-fixed or timed handles
//!   without touching the one you started from
//! - **Styles**: pick a preset or define your own ordered levels
//! - **Three sinks**: colored, wrapped console output plus an optional JSON
//!   lines log file and plain-text dump file, each with its own verbosity
//! - **Rich arguments**: structured values, errors with cause chains and
//!   traces, byte buffers and values that settle later
//! - **`-v` / `-q` flags** adjust console verbosity from the command line
//!
//! ```
//! use mulog::prelude::*;
//!
//! let logger = Logger::builder()
//!     .console(ConsoleSink::with_writers(std::io::sink(), std::io::sink()))
//!     .build()
//!     .unwrap();
//!
//! let server = logger.tag("server");
//! server.info("Now listening on localhost:8000");
//! server.tag("db").at("warn").unwrap().emit("pool exhausted");
//! ```

pub mod core;
#[cfg(feature = "facade")]
pub mod facade;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        Arg, Config, ConsoleConfig, Derivation, ErrorArg, FileSinkConfig, Formatter,
        InspectorConfig, LevelColor, LevelDefinition, LogRecord, Logger, LoggerBuilder,
        LoggerError, LoggerMetrics, Message, PendingValue, Result, Sink, Style, Target,
        DEFAULT_SHUTDOWN_TIMEOUT,
    };
    pub use crate::sinks::{ConsoleSink, DumpFileSink, LogFileSink};
}

pub use crate::core::{
    Arg, Config, ConsoleConfig, Derivation, ErrorArg, ErrorCallback, FileSinkConfig, Formatter,
    InspectorConfig, LevelColor, LevelDefinition, LogRecord, Logger, LoggerBuilder, LoggerError,
    LoggerMetrics, Message, PendingValue, Result, Sink, Style, Target, DEFAULT_SHUTDOWN_TIMEOUT,
};
pub use sinks::{ConsoleSink, DumpFileSink, LogFileSink};

#[cfg(feature = "facade")]
pub use facade::LogBridge;
