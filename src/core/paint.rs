//! Terminal styling primitives
//!
//! Small helpers around ANSI styling used by the formatter, the inspector and
//! the content normalizer:
//! - [`Paint`]: colorize a string (color table from `colored`)
//! - [`strip`]: remove all styling codes
//! - [`visible_width`]: printable width, ignoring styling codes
//! - [`wrap`]: word or hard wrapping that keeps styling codes intact
//!
//! Styling is emitted unconditionally; whether a sink shows it is decided by
//! the formatter, never by global terminal detection.

use colored::Color;

/// Reset all styling
pub const RESET: &str = "\x1b[0m";

/// A text style: optional foreground/background color plus weight
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Paint {
    fg: Option<Color>,
    bg: Option<Color>,
    bold: bool,
    dim: bool,
}

impl Paint {
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            bold: false,
            dim: false,
        }
    }

    #[must_use]
    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    #[must_use]
    pub const fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    #[must_use]
    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    #[must_use]
    pub const fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    #[must_use]
    pub const fn bold_if(self, bold: bool) -> Self {
        if bold {
            self.bold()
        } else {
            self
        }
    }

    /// Wrap `text` in this style followed by a reset
    pub fn apply(&self, text: &str) -> String {
        let mut codes: Vec<String> = Vec::with_capacity(4);
        if self.bold {
            codes.push("1".to_string());
        }
        if self.dim {
            codes.push("2".to_string());
        }
        if let Some(fg) = self.fg {
            codes.push(fg.to_fg_str().into_owned());
        }
        if let Some(bg) = self.bg {
            codes.push(bg.to_bg_str().into_owned());
        }

        if codes.is_empty() || text.is_empty() {
            return text.to_string();
        }
        format!("\x1b[{}m{}{}", codes.join(";"), text, RESET)
    }
}

/// Remove every styling code from `text`
pub fn strip(text: &str) -> String {
    strip_ansi_escapes::strip_str(text)
}

/// Printable width of `text` in terminal columns
pub fn visible_width(text: &str) -> usize {
    textwrap::core::display_width(text)
}

/// Wrap every line of `text` to at most `width` visible columns.
///
/// Word wrapping breaks at word boundaries and splits words longer than the
/// width; hard wrapping cuts at exactly `width` columns.
pub fn wrap(text: &str, width: usize, hard: bool) -> String {
    let width = width.max(1);
    if hard {
        text.split('\n')
            .map(|line| hard_wrap_line(line, width))
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        // Optimal fit may overrun a line when that scores better than a ragged break
        let options = textwrap::Options::new(width)
            .break_words(true)
            .wrap_algorithm(textwrap::WrapAlgorithm::FirstFit);
        textwrap::wrap(text, options).join("\n")
    }
}

fn hard_wrap_line(line: &str, width: usize) -> String {
    let mut out = String::with_capacity(line.len() + line.len() / width.max(1));
    let mut column = 0;
    let mut chars = line.chars().peekable();
    let mut buf = [0u8; 4];

    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // Escape sequences are copied through and take no columns
            out.push(c);
            if chars.peek() == Some(&'[') {
                for next in chars.by_ref() {
                    out.push(next);
                    if ('@'..='~').contains(&next) && next != '[' {
                        break;
                    }
                }
            }
            continue;
        }

        let char_width = visible_width(c.encode_utf8(&mut buf));
        if column > 0 && column + char_width > width {
            out.push('\n');
            column = 0;
        }
        out.push(c);
        column += char_width;
    }
    out
}
