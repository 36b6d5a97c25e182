//! Property-based tests for mulog using proptest

use mulog::core::paint::{self, Paint};
use mulog::core::{adjust_threshold, verbosity_adjustment, Content};
use mulog::prelude::*;
use parking_lot::Mutex;
use proptest::prelude::*;
use std::io;
use std::sync::Arc;

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<(String, Vec<String>)>>>);

impl Sink for Capture {
    fn write(&mut self, message: &Message, _: &LevelDefinition, _: &Formatter) -> Result<()> {
        self.0
            .lock()
            .push((message.level.clone(), message.tags.clone()));
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "capture"
    }
}

fn logger_with(capture: &Capture, verbosity: usize) -> Logger {
    Logger::builder()
        .console(ConsoleSink::with_writers(io::sink(), io::sink()))
        .sink(capture.clone(), verbosity)
        .args(Vec::<String>::new())
        .build()
        .expect("Failed to build logger")
}

fn tag_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z][a-z0-9_]{0,8}", 0..6)
}

// ============================================================================
// Derivation Tests
// ============================================================================

proptest! {
    /// Untyped emits always use the style default, however the handle was tagged
    #[test]
    fn test_emit_uses_default_level(tags in tag_strategy(), fix_first in any::<bool>()) {
        let capture = Capture::default();
        let logger = logger_with(&capture, 7);

        let mut derivation = logger.root();
        if fix_first {
            derivation = derivation.at("error").unwrap();
        }
        for tag in &tags {
            derivation = derivation.tag(tag.clone());
        }
        derivation.emit("x");

        let captured = capture.0.lock();
        let expected = if fix_first && tags.is_empty() { "error" } else { "log" };
        prop_assert_eq!(captured[0].0.as_str(), expected);
    }

    /// Tag paths concatenate in derivation order and never leak between handles
    #[test]
    fn test_tag_concatenation(first in tag_strategy(), second in tag_strategy()) {
        let capture = Capture::default();
        let logger = logger_with(&capture, 7);

        let parent = logger.root().tags_from(first.clone());
        let child = parent.tags_from(second.clone());

        let mut expected = first.clone();
        expected.extend(second);
        prop_assert_eq!(child.tags(), expected.as_slice());
        prop_assert_eq!(parent.tags(), first.as_slice());
        prop_assert_eq!(child.tag_path(), expected.join("."));

        child.info("c");
        parent.info("p");
        let captured = capture.0.lock();
        prop_assert_eq!(&captured[0].1, &expected);
        prop_assert_eq!(&captured[1].1, &first);
    }

    /// A sink with threshold t receives exactly the levels with rank <= t
    #[test]
    fn test_threshold_boundary(threshold in 0usize..=7, index in 0usize..7) {
        let capture = Capture::default();
        let logger = logger_with(&capture, threshold);
        let style = logger.style().clone();

        let level = &style.levels()[index];
        logger.root().emit_named(&level.name, vec!["x".into()]);

        let rank = style.rank_at(index);
        prop_assert_eq!(capture.0.lock().len(), usize::from(rank <= threshold));
    }

    /// Flags never push a threshold outside the style
    #[test]
    fn test_adjusted_threshold_is_clamped(
        base in 0usize..=7,
        verbose in 0usize..12,
        quiet in 0usize..12,
    ) {
        let mut args = Vec::new();
        if verbose > 0 {
            args.push(format!("-{}", "v".repeat(verbose)));
        }
        if quiet > 0 {
            args.push(format!("-{}", "q".repeat(quiet)));
        }
        let adjustment = verbosity_adjustment(&args);
        prop_assert_eq!(adjustment, verbose as i64 - quiet as i64);

        let adjusted = adjust_threshold(base, adjustment, 7);
        prop_assert!(adjusted <= 7);
        prop_assert_eq!(adjusted as i64, (base as i64 + adjustment).clamp(0, 7));
    }
}

// ============================================================================
// Formatting Tests
// ============================================================================

proptest! {
    /// Stripping styled text gives back the original
    #[test]
    fn test_strip_removes_styling(text in "[ -~]{0,60}", bold in any::<bool>()) {
        let style = Paint::new().fg(colored::Color::Magenta).bold_if(bold);
        prop_assert_eq!(paint::strip(&style.apply(&text)), text.clone());

        let content = Content::new(style.apply(&text));
        prop_assert_eq!(content.plain, text);
    }

    /// Wrapped terminal output never exceeds the terminal width
    #[test]
    fn test_wrapped_lines_fit_width(
        words in prop::collection::vec("[a-zA-Z]{1,60}", 1..40),
        width in 50usize..160,
        hard in any::<bool>(),
    ) {
        let formatter = Formatter::new(ConsoleConfig {
            hard_wrap: hard,
            ..ConsoleConfig::default()
        });
        let style = Style::default_style();
        let level = style.resolve("info").unwrap();
        let message = Message::new("info", 4, Content::new(words.join(" ")))
            .with_tags(vec!["server".to_string(), "api".to_string()])
            .with_call_site(Some("main.rs:12:5".into()));

        let output = formatter.format(&message, level, Target::Terminal { width });
        prop_assert!(output.ends_with('\n'));
        for line in output.lines() {
            let visible = paint::visible_width(&paint::strip(line));
            prop_assert!(visible <= width, "{} > {}: {:?}", visible, width, line);
        }
    }

    /// Plain output is never wrapped and holds no escape sequences
    #[test]
    fn test_plain_output_single_line(words in prop::collection::vec("[a-z]{1,12}", 1..60)) {
        let formatter = Formatter::new(ConsoleConfig::default());
        let style = Style::default_style();
        let level = style.resolve("warn").unwrap();
        let message = Message::new("warn", 2, Content::new(words.join(" ")));

        let output = formatter.format(&message, level, Target::Plain);
        prop_assert_eq!(output.lines().count(), 1);
        prop_assert!(!output.contains('\x1b'));
    }
}
