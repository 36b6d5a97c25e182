//! Console sink: stdout for regular levels, stderr for error levels

use crate::core::{Formatter, LevelDefinition, LoggerError, Message, Result, Sink, Target};
use std::io::{self, IsTerminal, Write};

/// Columns assumed when the terminal size can't be read
pub const FALLBACK_WIDTH: usize = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Styled; width sampled from the terminal on every write
    Terminal,
    /// Styled at a fixed width
    FixedWidth(usize),
    Plain,
}

impl Mode {
    fn detect(is_terminal: bool) -> Self {
        if is_terminal {
            Mode::Terminal
        } else {
            Mode::Plain
        }
    }
}

pub struct ConsoleSink {
    out: Box<dyn Write + Send>,
    err: Box<dyn Write + Send>,
    out_mode: Mode,
    err_mode: Mode,
}

impl ConsoleSink {
    /// Write to the process's stdout and stderr.
    ///
    /// Each stream is styled only when it is itself a terminal, so
    /// `app 2>errors.log` keeps the file free of escape sequences.
    pub fn new() -> Self {
        Self {
            out: Box::new(io::stdout()),
            err: Box::new(io::stderr()),
            out_mode: Mode::detect(io::stdout().is_terminal()),
            err_mode: Mode::detect(io::stderr().is_terminal()),
        }
    }

    /// Write to arbitrary streams, treated as non-interactive
    ///
    /// # Example
    ///
    /// ```
    /// use mulog::sinks::ConsoleSink;
    ///
    /// let sink = ConsoleSink::with_writers(Vec::new(), std::io::sink())
    ///     .interactive(100);
    /// ```
    pub fn with_writers<O, E>(out: O, err: E) -> Self
    where
        O: Write + Send + 'static,
        E: Write + Send + 'static,
    {
        Self {
            out: Box::new(out),
            err: Box::new(err),
            out_mode: Mode::Plain,
            err_mode: Mode::Plain,
        }
    }

    /// Treat both streams as a terminal `width` columns wide
    #[must_use]
    pub fn interactive(mut self, width: usize) -> Self {
        self.out_mode = Mode::FixedWidth(width);
        self.err_mode = Mode::FixedWidth(width);
        self
    }

    fn target(&self, is_error: bool) -> Target {
        let mode = if is_error { self.err_mode } else { self.out_mode };
        match mode {
            Mode::Terminal => Target::Terminal {
                width: terminal_width(),
            },
            Mode::FixedWidth(width) => Target::Terminal { width },
            Mode::Plain => Target::Plain,
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

fn terminal_width() -> usize {
    crossterm::terminal::size()
        .map(|(columns, _)| usize::from(columns))
        .ok()
        .filter(|columns| *columns > 0)
        .unwrap_or(FALLBACK_WIDTH)
}

impl Sink for ConsoleSink {
    fn write(
        &mut self,
        message: &Message,
        level: &LevelDefinition,
        formatter: &Formatter,
    ) -> Result<()> {
        let output = formatter.format(message, level, self.target(level.is_error));

        // Route error levels to stderr, others to stdout
        let stream = if level.is_error {
            &mut self.err
        } else {
            &mut self.out
        };
        stream
            .write_all(output.as_bytes())
            .and_then(|()| stream.flush())
            .map_err(|e| LoggerError::sink_write("console", e))
    }

    fn flush(&mut self) -> Result<()> {
        self.out
            .flush()
            .and_then(|()| self.err.flush())
            .map_err(|e| LoggerError::sink_write("console", e))
    }

    fn name(&self) -> &str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ConsoleConfig, Content, Style};
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Writer that keeps everything in a shared buffer
    #[derive(Clone, Default)]
    struct Shared(Arc<Mutex<Vec<u8>>>);

    impl Write for Shared {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Shared {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }
    }

    fn write(sink: &mut ConsoleSink, level: &str, text: &str) {
        let style = Style::default_style();
        let definition = style.resolve(level).unwrap();
        let message = Message::new(level, style.rank_of(level).unwrap(), Content::new(text.to_string()));
        sink.write(&message, definition, &Formatter::new(ConsoleConfig::default()))
            .unwrap();
    }

    #[test]
    fn test_error_levels_go_to_err_stream() {
        let (out, err) = (Shared::default(), Shared::default());
        let mut sink = ConsoleSink::with_writers(out.clone(), err.clone());

        write(&mut sink, "info", "to stdout");
        write(&mut sink, "warn", "to stderr");
        write(&mut sink, "error", "also stderr");

        assert!(out.text().contains("to stdout"));
        assert!(!out.text().contains("stderr"));
        assert!(err.text().contains("to stderr"));
        assert!(err.text().contains("also stderr"));
    }

    #[test]
    fn test_non_interactive_is_plain() {
        let out = Shared::default();
        let mut sink = ConsoleSink::with_writers(out.clone(), io::sink());
        write(&mut sink, "info", "hello");
        assert!(!out.text().contains('\x1b'));
    }

    #[test]
    fn test_interactive_is_styled() {
        let out = Shared::default();
        let mut sink = ConsoleSink::with_writers(out.clone(), io::sink()).interactive(120);
        write(&mut sink, "info", "hello");
        assert!(out.text().contains("\x1b["));
    }

    #[test]
    fn test_streams_styled_independently() {
        let (out, err) = (Shared::default(), Shared::default());
        let mut sink = ConsoleSink {
            out_mode: Mode::FixedWidth(120),
            ..ConsoleSink::with_writers(out.clone(), err.clone())
        };

        write(&mut sink, "info", "to a terminal");
        write(&mut sink, "error", "to a file");

        assert!(out.text().contains("\x1b["));
        assert!(err.text().contains("to a file"));
        assert!(!err.text().contains('\x1b'));
    }

    #[test]
    fn test_write_failure_is_reported() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut sink = ConsoleSink::with_writers(Broken, io::sink());
        let style = Style::default_style();
        let message = Message::new("info", 4, Content::new("x".to_string()));
        let result = sink.write(
            &message,
            style.resolve("info").unwrap(),
            &Formatter::new(ConsoleConfig::default()),
        );
        assert!(matches!(result, Err(LoggerError::SinkWrite { .. })));
    }
}
