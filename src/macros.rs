//! Logging macros taking any number of arguments.
//!
//! Each argument is converted with `Arg::from` and the results are joined with
//! spaces, the same as [`Derivation::emit_all`](crate::Derivation::emit_all).
//!
//! # Examples
//!
//! ```
//! use mulog::prelude::*;
//! use mulog::{info, ulog, warn};
//!
//! let logger = Logger::builder()
//!     .console(ConsoleSink::with_writers(std::io::sink(), std::io::sink()))
//!     .build()
//!     .unwrap();
//! let server = logger.tag("server");
//!
//! ulog!(server, "The current year is", 2025);
//! info!(server, "listening on port", 8080);
//! warn!(server, "retrying in", 5, "seconds");
//! ```

/// Log at the derivation's effective level.
#[macro_export]
macro_rules! ulog {
    ($derivation:expr, $($arg:expr),+ $(,)?) => {
        $derivation.emit_all(vec![$($crate::Arg::from($arg)),+])
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __emit_named {
    ($name:literal, $derivation:expr, $($arg:expr),+) => {
        $derivation.emit_named($name, vec![$($crate::Arg::from($arg)),+])
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use mulog::prelude::*;
/// # let logger = Logger::builder().console(ConsoleSink::with_writers(std::io::sink(), std::io::sink())).build().unwrap();
/// use mulog::debug;
/// debug!(logger.root(), "Counter value:", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($derivation:expr, $($arg:expr),+ $(,)?) => {
        $crate::__emit_named!("debug", $derivation, $($arg),+)
    };
}

/// Log a verbose-level message.
#[macro_export]
macro_rules! verbose {
    ($derivation:expr, $($arg:expr),+ $(,)?) => {
        $crate::__emit_named!("verbose", $derivation, $($arg),+)
    };
}

/// Log at the `log` level.
#[macro_export]
macro_rules! log {
    ($derivation:expr, $($arg:expr),+ $(,)?) => {
        $crate::__emit_named!("log", $derivation, $($arg),+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($derivation:expr, $($arg:expr),+ $(,)?) => {
        $crate::__emit_named!("info", $derivation, $($arg),+)
    };
}

/// Log a success-level message.
#[macro_export]
macro_rules! success {
    ($derivation:expr, $($arg:expr),+ $(,)?) => {
        $crate::__emit_named!("success", $derivation, $($arg),+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($derivation:expr, $($arg:expr),+ $(,)?) => {
        $crate::__emit_named!("warn", $derivation, $($arg),+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use mulog::prelude::*;
/// # let logger = Logger::builder().console(ConsoleSink::with_writers(std::io::sink(), std::io::sink())).build().unwrap();
/// use mulog::error;
/// let err = std::io::Error::new(std::io::ErrorKind::NotFound, "config.json");
/// error!(logger.tag("config"), "could not load:", Arg::error(&err));
/// ```
#[macro_export]
macro_rules! error {
    ($derivation:expr, $($arg:expr),+ $(,)?) => {
        $crate::__emit_named!("error", $derivation, $($arg),+)
    };
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Lines(Arc<Mutex<Vec<(String, String)>>>);

    impl Sink for Lines {
        fn write(&mut self, message: &Message, _: &LevelDefinition, _: &Formatter) -> Result<()> {
            self.0
                .lock()
                .push((message.level.clone(), message.plain_content.clone()));
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "lines"
        }
    }

    #[test]
    fn test_macros_join_arguments() {
        let lines = Lines::default();
        let logger = Logger::builder()
            .console(ConsoleSink::with_writers(std::io::sink(), std::io::sink()))
            .sink(lines.clone(), 7)
            .build()
            .unwrap();
        let root = logger.root();

        crate::ulog!(root, "year", 2025);
        crate::debug!(root, "a", "b");
        crate::verbose!(root, "v");
        crate::log!(root, "l");
        crate::info!(root, "port", 8080_u32);
        crate::success!(root, "ok", true);
        crate::warn!(root, "w");
        crate::error!(root, "e");

        let captured = lines.0.lock().clone();
        let levels: Vec<&str> = captured.iter().map(|(level, _)| level.as_str()).collect();
        assert_eq!(
            levels,
            ["log", "debug", "verbose", "log", "info", "success", "warn", "error"]
        );
        assert_eq!(captured[0].1, "year 2025");
        assert_eq!(captured[4].1, "port 8080");
        assert_eq!(captured[5].1, "ok true");
    }
}
