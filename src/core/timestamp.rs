//! Timestamp and elapsed-time formatting
//!
//! Console and dump output use a fixed-width `YYYY-MM-DD HH:MM:SS` stamp in
//! UTC or local time; log-file records use ISO 8601 with milliseconds.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// `2025-01-08 10:30:45`
    #[default]
    Console,

    /// `2025-01-08T10:30:45.123Z`
    Iso8601,
}

impl TimestampFormat {
    /// Format `datetime`, converting to local time unless `utc`.
    ///
    /// ISO 8601 output is always UTC.
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>, utc: bool) -> String {
        match self {
            TimestampFormat::Console if utc => datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
            TimestampFormat::Console => datetime
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        }
    }
}

/// Elapsed-time marker: `431ms`, `12.50s`, `3:07`
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    let millis = elapsed.as_millis();
    if millis < 1_000 {
        format!("{}ms", millis)
    } else if millis < 60_000 {
        format!("{:.2}s", elapsed.as_secs_f64())
    } else {
        let seconds = elapsed.as_secs();
        format!("{}:{:02}", seconds / 60, seconds % 60)
    }
}
