//! Chainable logging handles
//!
//! A [`Derivation`] is an immutable view of a logger with an optional fixed
//! level, an ordered tag path and an optional timer. Deriving never changes
//! the handle it started from:
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
//! let api = server.tag("api");
//! assert_eq!(server.tag_path(), "server");
//! assert_eq!(api.tag_path(), "server.api");
//!
//! api.info("Now listening on localhost:8000")
//!     .warn("Certificate expires in 3 days");
//! ```

use super::{
    content::{Arg, Content},
    error::{LoggerError, Result},
    inspect::hex_dump,
    level::LevelDefinition,
    logger::{call_site, Logger},
    message::Message,
    paint::Paint,
    pending::{self, PendingValue, Settled},
    timestamp::format_elapsed,
};
use colored::Color;
use futures::FutureExt;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;
use std::time::Instant;

const TIMER: Paint = Paint::new().fg(Color::BrightBlack).bold();

#[derive(Clone)]
pub struct Derivation {
    logger: Logger,
    level: Option<usize>,
    tags: Arc<[String]>,
    timer: Option<Instant>,
}

macro_rules! level_shortcuts {
    ($($(#[$meta:meta])* $method:ident => $name:literal),* $(,)?) => {
        $(
            $(#[$meta])*
            #[track_caller]
            pub fn $method(&self, arg: impl Into<Arg>) -> &Self {
                self.emit_named($name, vec![arg.into()])
            }
        )*
    };
}

impl Derivation {
    pub(crate) fn new(logger: Logger) -> Self {
        Self {
            logger,
            level: None,
            tags: Arc::from(Vec::new()),
            timer: None,
        }
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// The fixed level, if one was chosen
    pub fn level(&self) -> Option<&LevelDefinition> {
        self.level.and_then(|index| self.logger.style().get(index))
    }

    /// The level `emit` uses: the fixed one, else the style default
    pub fn effective_level(&self) -> &LevelDefinition {
        self.level().unwrap_or_else(|| self.logger.style().default_level())
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Dotted tag path, the same one messages are rendered with
    pub fn tag_path(&self) -> String {
        self.tags.join(".")
    }

    pub fn timer_started_at(&self) -> Option<Instant> {
        self.timer
    }

    /// Same tags and timer, fixed to the named level
    pub fn at(&self, name: &str) -> Result<Derivation> {
        let index = self
            .logger
            .style()
            .index_of(name)
            .ok_or_else(|| LoggerError::unknown_level(name))?;
        Ok(self.with_level(index))
    }

    /// One handle per level of the style, in style order
    pub fn children(&self) -> impl Iterator<Item = Derivation> + '_ {
        (0..self.logger.style().len()).map(move |index| self.with_level(index))
    }

    /// Append a tag. The result logs at the default level again.
    ///
    /// ```
    /// use mulog::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .console(ConsoleSink::with_writers(std::io::sink(), std::io::sink()))
    ///     .build()
    ///     .unwrap();
    ///
    /// let warn = logger.root().at("warn").unwrap();
    /// assert_eq!(warn.tag("db").effective_level().name, "log");
    /// ```
    pub fn tag(&self, name: impl Into<String>) -> Derivation {
        self.extend_tags(std::iter::once(name.into()))
    }

    /// Append several tags in order
    pub fn tags_from<I, S>(&self, names: I) -> Derivation
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extend_tags(names.into_iter().map(Into::into))
    }

    fn extend_tags(&self, names: impl Iterator<Item = String>) -> Derivation {
        let tags: Vec<String> = self.tags.iter().cloned().chain(names).collect();
        Derivation {
            logger: self.logger.clone(),
            level: None,
            tags: Arc::from(tags),
            timer: self.timer,
        }
    }

    /// Start a timer; messages from the result carry the time since now
    pub fn timer(&self) -> Derivation {
        Derivation {
            timer: Some(Instant::now()),
            ..self.clone()
        }
    }

    fn with_level(&self, index: usize) -> Derivation {
        Derivation {
            level: Some(index),
            ..self.clone()
        }
    }

    /// Log one argument at the effective level
    #[track_caller]
    pub fn emit(&self, arg: impl Into<Arg>) -> &Self {
        self.emit_all(vec![arg.into()])
    }

    /// Log several arguments, joined with spaces, at the effective level
    #[track_caller]
    pub fn emit_all(&self, args: Vec<Arg>) -> &Self {
        let index = self
            .level
            .unwrap_or_else(|| self.logger.style().default_index());
        self.emit_at(index, args, Some(call_site(Location::caller())));
        self
    }

    /// Log at a level looked up by name.
    ///
    /// An unknown name is reported through the error callback and nothing is
    /// logged; use [`Derivation::try_emit_at`] to handle it at the call.
    #[track_caller]
    pub fn emit_named(&self, name: &str, args: Vec<Arg>) -> &Self {
        let location = Location::caller();
        if let Err(e) = self.try_emit_at_location(name, args, location) {
            self.logger.report(e);
        }
        self
    }

    #[track_caller]
    pub fn try_emit_at(&self, name: &str, args: Vec<Arg>) -> Result<&Self> {
        self.try_emit_at_location(name, args, Location::caller())?;
        Ok(self)
    }

    fn try_emit_at_location(
        &self,
        name: &str,
        args: Vec<Arg>,
        location: &Location<'_>,
    ) -> Result<()> {
        let index = self
            .logger
            .style()
            .index_of(name)
            .ok_or_else(|| LoggerError::unknown_level(name))?;
        self.emit_at(index, args, Some(call_site(location)));
        Ok(())
    }

    level_shortcuts! {
        /// Log at `debug`, the most verbose default level
        debug => "debug",
        verbose => "verbose",
        log => "log",
        info => "info",
        success => "success",
        warn => "warn",
        /// Log at `error`; the console routes it to stderr
        error => "error",
    }

    /// Log a hex dump of `bytes` at the most verbose level
    #[track_caller]
    pub fn dump(&self, bytes: impl AsRef<[u8]>) -> &Self {
        let dump = hex_dump(bytes.as_ref());
        self.emit_at(0, vec![Arg::Text(dump)], Some(call_site(Location::caller())));
        self
    }

    /// Build a message at `index` and send it to the sinks.
    ///
    /// Pending values among `args` are scheduled after the message is
    /// written, each logging its outcome through a copy of this handle.
    pub(crate) fn emit_at(&self, index: usize, args: Vec<Arg>, call_site: Option<String>) {
        let style = self.logger.style();
        let Some(level) = style.get(index) else {
            self.logger.report(LoggerError::unknown_level(index.to_string()));
            return;
        };

        let normalized = self.logger.normalizer().normalize(args);

        let mut content: Content = normalized.content;
        if let Some(started) = self.timer {
            let marker = format!("+{}", format_elapsed(started.elapsed()));
            content = content.prefixed(&TIMER.apply(&marker));
        }

        let message = Message::new(level.name.clone(), style.rank_at(index), content)
            .with_tags(self.tags.to_vec())
            .with_call_site(normalized.call_site.or_else(|| call_site.clone()));
        self.logger.dispatch(&message, level);

        // Placeholder first, so a future that is already ready can't overtake it
        for value in normalized.pending {
            self.schedule(index, value, call_site.clone());
        }
    }

    fn schedule(&self, index: usize, value: PendingValue, call_site: Option<String>) {
        let guard = self.logger.pending_tracker().begin();
        self.logger.metrics().record_pending_scheduled();

        let derivation = self.clone();
        let enqueued = Instant::now();
        let future = value.into_future();
        let task = async move {
            let outcome = future.await;
            let settled = Settled {
                outcome: outcome.map(Box::new).map_err(Box::new),
                call_site: call_site.clone(),
                elapsed: enqueued.elapsed(),
            };
            derivation.emit_at(index, vec![Arg::Settled(settled)], call_site);
            derivation.logger.metrics().record_pending_settled();
            drop(guard);
        }
        .boxed();

        if let Err(e) = pending::spawn(task) {
            self.logger.report(e);
        }
    }
}

impl fmt::Debug for Derivation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Derivation")
            .field("level", &self.level().map(|level| level.name.as_str()))
            .field("tags", &self.tags)
            .field("timer", &self.timer.is_some())
            .finish()
    }
}
