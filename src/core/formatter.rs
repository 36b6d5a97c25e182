//! Human-readable message formatting
//!
//! Produces the text shown on the console and written to the dump file:
//!
//! ```text
//! 2025-01-08 10:30:45 [i] server Now listening on localhost:8000  (main.rs 12:5)
//! ```
//!
//! Terminal output is colored and, when enabled, wrapped and indented so that
//! continuation lines line up under the content column. Plain output carries
//! the same text without styling, wrapping or indentation.

use super::config::ConsoleConfig;
use super::level::LevelDefinition;
use super::message::Message;
use super::paint::{self, Paint, RESET};
use super::timestamp::TimestampFormat;
use colored::Color;

#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

const TIMESTAMP: Paint = Paint::new().fg(Color::BrightBlack).bold();
const TAGS: Paint = Paint::new().fg(Color::Cyan).bold();
const CALL_SITE: Paint = Paint::new().fg(Color::BrightBlack);

/// Where formatted text goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Interactive terminal `width` columns wide
    Terminal { width: usize },
    /// File or pipe
    Plain,
}

/// Formats messages according to the console options
#[derive(Debug, Clone)]
pub struct Formatter {
    options: ConsoleConfig,
}

impl Formatter {
    pub fn new(options: ConsoleConfig) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ConsoleConfig {
        &self.options
    }

    /// Format `message` (at `level`) for `target`, ending in one line break
    pub fn format(&self, message: &Message, level: &LevelDefinition, target: Target) -> String {
        let styled = matches!(target, Target::Terminal { .. }) && self.options.colors;
        let paint = |style: Paint, text: &str| {
            if styled {
                style.apply(text)
            } else {
                text.to_string()
            }
        };

        let timestamp = TimestampFormat::Console.format(&message.timestamp, self.options.utc);
        let mut output = paint(TIMESTAMP, &format!("{} ", timestamp));
        output.push_str(&paint(level.paint(), &level.symbol));
        output.push(' ');

        let meta_width = paint::visible_width(&output);

        let mut content = String::new();
        if !message.tags.is_empty() {
            content.push_str(&paint(TAGS, &message.tag_path()));
            content.push(' ');
        }
        if styled {
            content.push_str(&message.content.replace('\n', &format!("\n{}", RESET)));
        } else {
            content.push_str(&message.plain_content);
        }
        if let Some(call_site) = &message.call_site {
            content.push_str("  ");
            content.push_str(&paint(
                CALL_SITE,
                &format!("({})", spaced_line_column(call_site)),
            ));
        }

        if let Target::Terminal { width } = target {
            let wrap_width = width.saturating_sub(meta_width);
            if wrap_width > meta_width {
                if self.options.wrap {
                    content = paint::wrap(&content, wrap_width, self.options.hard_wrap);
                }
                if self.options.indent {
                    content = content.replace('\n', &format!("\n{}", " ".repeat(meta_width)));
                }
            }
        }

        output.push_str(&content);
        normalize_line_endings(&output) + LINE_ENDING
    }
}

/// `main.rs:12:5` becomes `main.rs 12:5`
fn spaced_line_column(call_site: &str) -> String {
    let mut parts = call_site.rsplitn(3, ':');
    let (column, line, file) = (parts.next(), parts.next(), parts.next());
    match (file, line, column) {
        (Some(file), Some(line), Some(column))
            if is_number(line) && is_number(column) && !file.is_empty() =>
        {
            format!("{} {}:{}", file, line, column)
        }
        _ => call_site.to_string(),
    }
}

fn is_number(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

fn normalize_line_endings(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    if LINE_ENDING == "\n" {
        unified
    } else {
        unified.replace('\n', LINE_ENDING)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::content::Content;
    use crate::core::level::Style;
    use chrono::TimeZone;

    fn message(text: &str) -> Message {
        let timestamp = chrono::Utc
            .with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime");
        Message::new("info", 4, Content::new(text.to_string())).with_timestamp(timestamp)
    }

    fn info() -> LevelDefinition {
        Style::default_style().resolve("info").unwrap().clone()
    }

    #[test]
    fn test_plain_layout() {
        let formatter = Formatter::new(ConsoleConfig::default());
        let message = message("Now listening on localhost:8000")
            .with_tags(vec!["server".to_string()])
            .with_call_site(Some("src/main.rs:12:5".to_string()));

        let output = formatter.format(&message, &info(), Target::Plain);
        assert_eq!(
            output,
            format!(
                "2025-01-08 10:30:45 [i] server Now listening on localhost:8000  (src/main.rs 12:5){}",
                LINE_ENDING
            )
        );
    }

    #[test]
    fn test_terminal_output_is_colored() {
        let formatter = Formatter::new(ConsoleConfig::default());
        let output = formatter.format(&message("hi"), &info(), Target::Terminal { width: 200 });
        assert!(output.contains("\x1b["));
        assert_eq!(
            paint::strip(&output),
            formatter.format(&message("hi"), &info(), Target::Plain)
        );
    }

    #[test]
    fn test_colors_disabled() {
        let formatter = Formatter::new(ConsoleConfig {
            colors: false,
            ..ConsoleConfig::default()
        });
        let output = formatter.format(&message("hi"), &info(), Target::Terminal { width: 200 });
        assert!(!output.contains('\x1b'));
    }

    #[test]
    fn test_line_breaks_reset_style() {
        let formatter = Formatter::new(ConsoleConfig {
            indent: false,
            ..ConsoleConfig::default()
        });
        let output = formatter.format(&message("a\nb"), &info(), Target::Terminal { width: 200 });
        assert!(output.contains(&format!("\n{}", RESET)));
    }

    #[test]
    fn test_wrap_and_indent() {
        let formatter = Formatter::new(ConsoleConfig::default());
        let text = "lorem ipsum dolor sit amet consectetur adipiscing elit sed do eiusmod";
        let output = formatter.format(&message(text), &info(), Target::Terminal { width: 60 });
        let lines: Vec<String> = output.lines().map(paint::strip).collect();

        assert!(lines.len() > 1);
        for line in &lines {
            assert!(paint::visible_width(line) <= 60, "too wide: {:?}", line);
        }
        // "2025-01-08 10:30:45 [i] " is 24 columns
        for line in &lines[1..] {
            assert!(line.starts_with(&" ".repeat(24)));
            assert!(!line.starts_with(&" ".repeat(25)));
        }
    }

    #[test]
    fn test_narrow_terminal_skips_wrap() {
        let formatter = Formatter::new(ConsoleConfig::default());
        let text = "lorem ipsum dolor sit amet consectetur adipiscing elit";
        let output = formatter.format(&message(text), &info(), Target::Terminal { width: 40 });
        assert_eq!(output.lines().count(), 1);
    }

    #[test]
    fn test_plain_never_wraps() {
        let formatter = Formatter::new(ConsoleConfig::default());
        let text = "word ".repeat(100);
        let output = formatter.format(&message(&text), &info(), Target::Plain);
        assert_eq!(output.lines().count(), 1);
        assert!(output.ends_with(LINE_ENDING));
        assert!(!output.ends_with(&format!("{}{}", LINE_ENDING, LINE_ENDING)));
    }

    #[test]
    fn test_spaced_line_column() {
        assert_eq!(spaced_line_column("main.rs:12:5"), "main.rs 12:5");
        assert_eq!(spaced_line_column("C:/src/main.rs:1:2"), "C:/src/main.rs 1:2");
        assert_eq!(spaced_line_column("main.rs"), "main.rs");
        assert_eq!(spaced_line_column("main.rs:12"), "main.rs:12");
    }
}
