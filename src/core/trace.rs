//! Call-location traces attached to logged errors
//!
//! A [`Trace`] is a list of frames. By default it is rendered as one summary
//! line that groups consecutive frames by crate, e.g.
//! `at std[x3], tokio[x12], my_app`; full mode prints one line per frame.

use std::fmt::Write as _;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceFrame {
    /// Demangled symbol without hash, e.g. `my_app::server::run`
    pub symbol: String,
    /// `file:line:column` when debug info has it
    pub location: Option<String>,
}

impl TraceFrame {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            location: None,
        }
    }

    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Crate (or leading path segment) the frame belongs to
    pub fn group(&self) -> &str {
        let symbol = self
            .symbol
            .trim_start_matches(['<', '&', '('])
            .trim_start_matches("mut ")
            .trim_start_matches("dyn ");
        let end = symbol
            .find(|c: char| !(c.is_alphanumeric() || c == '_'))
            .unwrap_or(symbol.len());
        if end == 0 {
            "<unknown>"
        } else {
            &symbol[..end]
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
    frames: Vec<TraceFrame>,
}

impl Trace {
    /// Capture the current stack, skipping frames of the tracer and this crate
    pub fn capture() -> Self {
        let backtrace = backtrace::Backtrace::new();
        let mut frames = Vec::new();

        for frame in backtrace.frames() {
            for symbol in frame.symbols() {
                let Some(name) = symbol.name() else {
                    continue;
                };
                let mut trace_frame = TraceFrame::new(format!("{:#}", name));
                if let (Some(file), Some(line)) = (symbol.filename(), symbol.lineno()) {
                    let mut location = format!("{}:{}", file.display(), line);
                    if let Some(column) = symbol.colno() {
                        let _ = write!(location, ":{}", column);
                    }
                    trace_frame.location = Some(location);
                }
                frames.push(trace_frame);
            }
        }

        let own = [env!("CARGO_CRATE_NAME"), "backtrace"];
        let skip = frames
            .iter()
            .take_while(|frame| own.contains(&frame.group()))
            .count();
        frames.drain(..skip);

        Self { frames }
    }

    pub fn from_frames(frames: Vec<TraceFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[TraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Consecutive frames of one group collapsed: `at a[x3], b`
    pub fn summary(&self) -> Option<String> {
        let mut groups: Vec<(&str, usize)> = Vec::new();
        for frame in &self.frames {
            match groups.last_mut() {
                Some((group, count)) if *group == frame.group() => *count += 1,
                _ => groups.push((frame.group(), 1)),
            }
        }
        if groups.is_empty() {
            return None;
        }

        let parts: Vec<String> = groups
            .into_iter()
            .map(|(group, count)| {
                if count > 1 {
                    format!("{}[x{}]", group, count)
                } else {
                    group.to_string()
                }
            })
            .collect();
        Some(format!("at {}", parts.join(", ")))
    }

    /// One `at symbol (location)` line per frame
    pub fn full(&self) -> Vec<String> {
        self.frames
            .iter()
            .map(|frame| match &frame.location {
                Some(location) => format!("at {} ({})", frame.symbol, location),
                None => format!("at {}", frame.symbol),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames(symbols: &[&str]) -> Trace {
        Trace::from_frames(symbols.iter().map(|s| TraceFrame::new(*s)).collect())
    }

    #[test]
    fn test_group_of_symbols() {
        assert_eq!(TraceFrame::new("my_app::server::run").group(), "my_app");
        assert_eq!(
            TraceFrame::new("<alloc::boxed::Box<F> as core::ops::FnOnce<A>>::call_once").group(),
            "alloc"
        );
        assert_eq!(TraceFrame::new("main").group(), "main");
        assert_eq!(TraceFrame::new("").group(), "<unknown>");
    }

    #[test]
    fn test_summary_collapses_runs() {
        let trace = frames(&[
            "my_app::db::query",
            "my_app::handler",
            "tokio::runtime::park",
            "tokio::runtime::run",
            "tokio::runtime::block_on",
            "std::rt::lang_start",
        ]);
        assert_eq!(
            trace.summary().as_deref(),
            Some("at my_app[x2], tokio[x3], std")
        );
    }

    #[test]
    fn test_summary_of_empty_trace() {
        assert_eq!(Trace::default().summary(), None);
    }

    #[test]
    fn test_full_lists_every_frame() {
        let trace = Trace::from_frames(vec![
            TraceFrame::new("my_app::main").with_location("src/main.rs:10:5"),
            TraceFrame::new("std::rt::lang_start"),
        ]);
        assert_eq!(
            trace.full(),
            vec![
                "at my_app::main (src/main.rs:10:5)".to_string(),
                "at std::rt::lang_start".to_string()
            ]
        );
    }

    #[test]
    fn test_capture_skips_own_frames() {
        let trace = Trace::capture();
        if let Some(first) = trace.frames().first() {
            assert_ne!(first.group(), "backtrace");
        }
    }
}
