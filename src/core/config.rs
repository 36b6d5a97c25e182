//! Logger configuration
//!
//! Every section is `#[serde(default)]`, so a partial document only overrides
//! the options it names:
//!
//! ```
//! use mulog::Config;
//!
//! let config = Config::from_json(r#"{"console": {"wrap": false}, "levels": "simple"}"#).unwrap();
//! assert!(!config.console.wrap);
//! assert!(config.console.indent);
//! ```

use super::error::Result;
use super::level::Style;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable requesting full error traces
pub const FULL_TRACE_ENV: &str = "MULOG_FULL_TRACE";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Active style: a preset name or a list of levels
    pub levels: Style,
    pub console: ConsoleConfig,
    pub log_file: FileSinkConfig,
    pub dump_file: FileSinkConfig,
    pub inspector: InspectorConfig,
    /// Print every trace frame of logged errors; unset = decided by environment
    pub full_traces: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Highest rank shown; unset = every level but the most suppressible
    pub verbosity: Option<usize>,
    pub colors: bool,
    pub utc: bool,
    pub wrap: bool,
    pub hard_wrap: bool,
    pub indent: bool,
    /// Adjust `verbosity` by repeated `-v` / `-q` process arguments
    pub respect_verbosity_flags: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            verbosity: None,
            colors: true,
            utc: true,
            wrap: true,
            hard_wrap: false,
            indent: true,
            respect_verbosity_flags: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSinkConfig {
    /// File is opened at construction when set
    pub path: Option<PathBuf>,
    /// Highest rank written; unset = every level
    pub verbosity: Option<usize>,
}

impl FileSinkConfig {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            verbosity: None,
        }
    }

    #[must_use]
    pub fn with_verbosity(mut self, verbosity: usize) -> Self {
        self.verbosity = Some(verbosity);
        self
    }
}

/// Options for rendering structured values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectorConfig {
    /// Nesting below this depth is elided
    pub max_depth: usize,
    /// Longer strings are cut and marked with an ellipsis
    pub max_string_length: Option<usize>,
    /// Values whose single-line form is wider than this are laid out over several lines
    pub inline_width: usize,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            max_depth: 6,
            max_string_length: None,
            inline_width: 72,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (possibly partial) JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn with_levels(mut self, levels: Style) -> Self {
        self.levels = levels;
        self
    }

    #[must_use]
    pub fn with_console(mut self, console: ConsoleConfig) -> Self {
        self.console = console;
        self
    }

    #[must_use]
    pub fn with_console_verbosity(mut self, verbosity: usize) -> Self {
        self.console.verbosity = Some(verbosity);
        self
    }

    #[must_use]
    pub fn with_colors(mut self, colors: bool) -> Self {
        self.console.colors = colors;
        self
    }

    #[must_use]
    pub fn with_log_file(mut self, log_file: FileSinkConfig) -> Self {
        self.log_file = log_file;
        self
    }

    #[must_use]
    pub fn with_dump_file(mut self, dump_file: FileSinkConfig) -> Self {
        self.dump_file = dump_file;
        self
    }

    #[must_use]
    pub fn with_inspector(mut self, inspector: InspectorConfig) -> Self {
        self.inspector = inspector;
        self
    }

    #[must_use]
    pub fn with_full_traces(mut self, full: bool) -> Self {
        self.full_traces = Some(full);
        self
    }

    /// Console threshold before flags: configured value or `len - 1`, clamped
    pub fn console_threshold(&self) -> usize {
        let len = self.levels.len();
        self.console
            .verbosity
            .unwrap_or_else(|| len.saturating_sub(1))
            .min(len)
    }

    /// Whether full traces are on, consulting the environment when unset
    pub fn resolve_full_traces(&self) -> bool {
        self.full_traces.unwrap_or_else(|| {
            let requested = std::env::var(FULL_TRACE_ENV)
                .map(|value| !value.is_empty() && value != "0")
                .unwrap_or(false);
            requested || std::env::var("RUST_BACKTRACE").is_ok_and(|value| value == "full")
        })
    }
}

impl FileSinkConfig {
    /// Threshold for this sink: configured value or every level, clamped
    pub fn threshold(&self, style_len: usize) -> usize {
        self.verbosity.unwrap_or(style_len).min(style_len)
    }
}

/// Net verbosity change requested by `-v`/`-vv`/... and `-q`/`-qq`/... arguments.
///
/// Only arguments made of a single dash and one repeated letter count; the
/// scan stops at `--`.
pub fn verbosity_adjustment<I, S>(args: I) -> i64
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut adjustment = 0i64;
    for arg in args {
        let arg = arg.as_ref();
        if arg == "--" {
            break;
        }
        let Some(flags) = arg.strip_prefix('-') else {
            continue;
        };
        if flags.is_empty() || flags.starts_with('-') {
            continue;
        }
        if flags.chars().all(|c| c == 'v') {
            adjustment += flags.len() as i64;
        } else if flags.chars().all(|c| c == 'q') {
            adjustment -= flags.len() as i64;
        }
    }
    adjustment
}

/// Apply a flag adjustment to a threshold, clamped to `0..=max`
pub fn adjust_threshold(threshold: usize, adjustment: i64, max: usize) -> usize {
    let adjusted = threshold as i64 + adjustment;
    adjusted.clamp(0, max as i64) as usize
}
