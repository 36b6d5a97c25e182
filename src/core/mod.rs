//! Core logger types and traits

pub mod config;
pub mod content;
pub mod derivation;
pub mod error;
pub mod formatter;
pub mod inspect;
pub mod level;
pub mod logger;
pub mod message;
pub mod metrics;
pub mod paint;
pub mod pending;
pub mod record;
pub mod sink;
pub mod timestamp;
pub mod trace;

pub use config::{
    adjust_threshold, verbosity_adjustment, Config, ConsoleConfig, FileSinkConfig,
    InspectorConfig, FULL_TRACE_ENV,
};
pub use content::{Arg, Content, ErrorArg, Normalized, Normalizer, PENDING_PLACEHOLDER};
pub use derivation::Derivation;
pub use error::{LoggerError, Result};
pub use formatter::{Formatter, Target, LINE_ENDING};
pub use inspect::{hex_dump, Inspector};
pub use level::{LevelColor, LevelDefinition, Style};
pub use logger::{ErrorCallback, Logger, LoggerBuilder, DEFAULT_SHUTDOWN_TIMEOUT};
pub use message::Message;
pub use metrics::LoggerMetrics;
pub use pending::{PendingValue, Settled};
pub use record::LogRecord;
pub use sink::Sink;
pub use timestamp::{format_elapsed, TimestampFormat};
pub use trace::{Trace, TraceFrame};
