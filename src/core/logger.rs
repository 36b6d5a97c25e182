//! Logger instance: configuration, open sinks and fan-out

use super::{
    config::{adjust_threshold, verbosity_adjustment, Config},
    content::Normalizer,
    derivation::Derivation,
    error::{LoggerError, Result},
    formatter::Formatter,
    inspect::Inspector,
    level::{LevelDefinition, Style},
    message::Message,
    metrics::LoggerMetrics,
    pending::PendingTracker,
    sink::Sink,
};
use crate::sinks::{ConsoleSink, DumpFileSink, LogFileSink};
use parking_lot::Mutex;
use std::fmt;
use std::panic::Location;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

/// Default time [`Logger::shutdown`] callers usually allow for pending values
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Receives sink failures and other errors that can't be returned to a caller
pub type ErrorCallback = Arc<dyn Fn(&LoggerError) + Send + Sync>;

static GLOBAL: OnceLock<Logger> = OnceLock::new();

struct SinkSlot {
    threshold: usize,
    sink: Mutex<Box<dyn Sink>>,
}

impl SinkSlot {
    fn new(sink: Box<dyn Sink>, threshold: usize) -> Self {
        Self {
            threshold,
            sink: Mutex::new(sink),
        }
    }
}

struct LoggerInner {
    config: Config,
    console_threshold: usize,
    formatter: Formatter,
    normalizer: Normalizer,
    sinks: Vec<SinkSlot>,
    metrics: LoggerMetrics,
    pending: Arc<PendingTracker>,
    on_error: Option<ErrorCallback>,
}

/// A logger instance, shared by every [`Derivation`] made from it.
///
/// Cloning is cheap and yields a handle to the same instance.
#[derive(Clone)]
pub struct Logger {
    inner: Arc<LoggerInner>,
}

impl Logger {
    /// Create a logger writing to stdout/stderr plus any configured files
    pub fn new(config: Config) -> Result<Self> {
        LoggerBuilder::new().config(config).build()
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use mulog::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .levels(Style::simple())
    ///     .args(["-v"])
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(logger.console_threshold(), 7);
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// The process-wide logger, created with the default configuration on
    /// first use unless [`Logger::init_global`] ran before.
    pub fn global() -> &'static Logger {
        GLOBAL.get_or_init(|| LoggerBuilder::new().assemble(Vec::new()))
    }

    /// Install the process-wide logger. Fails if one already exists.
    pub fn init_global(config: Config) -> Result<&'static Logger> {
        let logger = Logger::new(config)?;
        GLOBAL
            .set(logger)
            .map_err(|_| LoggerError::AlreadyInitialized)?;
        GLOBAL.get().ok_or(LoggerError::AlreadyInitialized)
    }

    /// Handle without tags, logging at the default level
    pub fn root(&self) -> Derivation {
        Derivation::new(self.clone())
    }

    /// Shorthand for `root().tag(name)`
    pub fn tag(&self, name: impl Into<String>) -> Derivation {
        self.root().tag(name)
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn style(&self) -> &Style {
        &self.inner.config.levels
    }

    /// Console threshold after defaults, flags and clamping
    pub fn console_threshold(&self) -> usize {
        self.inner.console_threshold
    }

    pub fn formatter(&self) -> &Formatter {
        &self.inner.formatter
    }

    pub(crate) fn normalizer(&self) -> &Normalizer {
        &self.inner.normalizer
    }

    pub(crate) fn pending_tracker(&self) -> &Arc<PendingTracker> {
        &self.inner.pending
    }

    /// Get the logger metrics
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.inner.metrics
    }

    /// Pending values that haven't settled yet
    pub fn pending_count(&self) -> usize {
        self.inner.pending.outstanding()
    }

    /// Block until every pending value has settled and been logged.
    ///
    /// Returns `false` if `timeout` expired first.
    pub fn wait_pending(&self, timeout: Duration) -> bool {
        self.inner.pending.wait(timeout)
    }

    /// Flush every sink, even after one fails.
    ///
    /// The first failure is returned; later ones go to the error callback.
    pub fn flush(&self) -> Result<()> {
        let mut first = None;
        for slot in &self.inner.sinks {
            if let Err(e) = slot.sink.lock().flush() {
                if first.is_none() {
                    first = Some(e);
                } else {
                    self.report(e);
                }
            }
        }
        first.map_or(Ok(()), Err)
    }

    /// Wait for pending values, then flush every sink
    ///
    /// `true` if everything settled within `timeout` and flushing succeeded
    pub fn shutdown(&self, timeout: Duration) -> bool {
        let settled = self.wait_pending(timeout);
        if !settled {
            eprintln!(
                "[LOGGER WARNING] {} pending values did not settle within {:?}. \
                 Their messages will be lost.",
                self.pending_count(),
                timeout
            );
        }

        if let Err(e) = self.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
            return false;
        }

        settled
    }

    /// `file:line:column` of the caller (through any `#[track_caller]` frames)
    #[track_caller]
    pub fn resolve_call_site() -> String {
        call_site(Location::caller())
    }

    /// Hand an error to the error callback, or print it
    pub(crate) fn report(&self, error: LoggerError) {
        match &self.inner.on_error {
            Some(callback) => callback(&error),
            None => eprintln!("[LOGGER ERROR] {}", error),
        }
    }

    /// Write `message` to every sink whose threshold it passes.
    ///
    /// **Per-Sink Isolation**: a sink that fails or panics is reported and
    /// skipped; the remaining sinks still receive the message.
    pub(crate) fn dispatch(&self, message: &Message, level: &LevelDefinition) {
        let metrics = &self.inner.metrics;
        metrics.record_emitted();

        for slot in &self.inner.sinks {
            if !message.passes(slot.threshold) {
                metrics.record_filtered();
                continue;
            }

            let mut sink = slot.sink.lock();
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                sink.write(message, level, &self.inner.formatter)
            }));

            match result {
                Ok(Ok(())) => {
                    metrics.record_written();
                }
                Ok(Err(e)) => {
                    metrics.record_failed();
                    self.report(e);
                }
                Err(panic_info) => {
                    metrics.record_failed();
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    eprintln!(
                        "[LOGGER CRITICAL] Sink '{}' panicked: {}. \
                         Other sinks continue to function.",
                        sink.name(),
                        panic_msg
                    );
                }
            }
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("levels", &self.style().len())
            .field("console_threshold", &self.inner.console_threshold)
            .field("sinks", &self.inner.sinks.len())
            .finish()
    }
}

pub(crate) fn call_site(location: &Location<'_>) -> String {
    let file = Path::new(location.file())
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(location.file());
    format!("{}:{}:{}", file, location.line(), location.column())
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use mulog::prelude::*;
/// use std::sync::Arc;
///
/// let logger = Logger::builder()
///     .config(Config::default().with_console_verbosity(4))
///     .console(ConsoleSink::with_writers(std::io::sink(), std::io::sink()))
///     .on_error(Arc::new(|err: &LoggerError| eprintln!("logging failed: {}", err)))
///     .build()
///     .unwrap();
///
/// logger.root().info("ready");
/// ```
pub struct LoggerBuilder {
    config: Config,
    console: Option<Box<dyn Sink>>,
    sinks: Vec<(Box<dyn Sink>, Option<usize>)>,
    args: Option<Vec<String>>,
    on_error: Option<ErrorCallback>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            console: None,
            sinks: Vec::new(),
            args: None,
            on_error: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Set the active style
    #[must_use = "builder methods return a new value"]
    pub fn levels(mut self, levels: Style) -> Self {
        self.config.levels = levels;
        self
    }

    /// Replace the stdout/stderr console sink
    #[must_use = "builder methods return a new value"]
    pub fn console<S: Sink + 'static>(mut self, console: S) -> Self {
        self.console = Some(Box::new(console));
        self
    }

    /// Add another sink with its own threshold (clamped to the style length)
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S, verbosity: usize) -> Self {
        self.sinks.push((Box::new(sink), Some(verbosity)));
        self
    }

    /// Process arguments to scan for `-v`/`-q` flags instead of `std::env::args()`
    #[must_use = "builder methods return a new value"]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = Some(args.into_iter().map(Into::into).collect());
        self
    }

    /// Set a callback for errors that have no caller to return to
    #[must_use = "builder methods return a new value"]
    pub fn on_error(mut self, callback: ErrorCallback) -> Self {
        self.on_error = Some(callback);
        self
    }

    /// Open configured files and build the Logger
    pub fn build(self) -> Result<Logger> {
        let len = self.config.levels.len();
        let mut files = Vec::new();

        if let Some(path) = &self.config.log_file.path {
            let sink = LogFileSink::open(path)?;
            files.push(SinkSlot::new(Box::new(sink), self.config.log_file.threshold(len)));
        }
        if let Some(path) = &self.config.dump_file.path {
            let sink = DumpFileSink::open(path)?;
            files.push(SinkSlot::new(Box::new(sink), self.config.dump_file.threshold(len)));
        }

        Ok(self.assemble(files))
    }

    fn assemble(self, files: Vec<SinkSlot>) -> Logger {
        let len = self.config.levels.len();

        let adjustment = if self.config.console.respect_verbosity_flags {
            match &self.args {
                Some(args) => verbosity_adjustment(args),
                None => verbosity_adjustment(std::env::args().skip(1)),
            }
        } else {
            0
        };
        let console_threshold = adjust_threshold(self.config.console_threshold(), adjustment, len);

        let console: Box<dyn Sink> = match self.console {
            Some(console) => console,
            None => Box::new(ConsoleSink::new()),
        };
        let mut sinks = vec![SinkSlot::new(console, console_threshold)];
        sinks.extend(files);
        sinks.extend(self.sinks.into_iter().map(|(sink, verbosity)| {
            let threshold = verbosity.unwrap_or(len).min(len);
            SinkSlot::new(sink, threshold)
        }));

        let normalizer = Normalizer::new(
            Inspector::new(self.config.inspector.clone()),
            self.config.resolve_full_traces(),
        );

        Logger {
            inner: Arc::new(LoggerInner {
                formatter: Formatter::new(self.config.console.clone()),
                normalizer,
                console_threshold,
                sinks,
                metrics: LoggerMetrics::new(),
                pending: Arc::new(PendingTracker::default()),
                on_error: self.on_error,
                config: self.config,
            }),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
