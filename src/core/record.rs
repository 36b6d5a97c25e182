//! Log-file records
//!
//! One JSON object per line: `{"timestamp", "level", "tags", "message", "callSite"}`,
//! with the message stripped of styling.

use super::message::Message;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// ISO 8601 UTC with milliseconds
    pub timestamp: String,
    pub level: String,
    pub tags: Vec<String>,
    pub message: String,
    #[serde(rename = "callSite")]
    pub call_site: Option<String>,
}

impl LogRecord {
    pub fn from_message(message: &Message) -> Self {
        Self {
            timestamp: TimestampFormat::Iso8601.format(&message.timestamp, true),
            level: message.level.clone(),
            tags: message.tags.clone(),
            message: message.plain_content.clone(),
            call_site: message.call_site.clone(),
        }
    }

    /// Serialize to a single-line JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::content::Content;
    use chrono::TimeZone;

    fn sample() -> Message {
        let timestamp = chrono::Utc
            .with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime");
        Message::new("warn", 2, Content::new("\x1b[31mdisk\x1b[0m\nalmost full".to_string()))
            .with_tags(vec!["storage".to_string()])
            .with_call_site(Some("disk.rs:12:9".to_string()))
            .with_timestamp(timestamp)
    }

    #[test]
    fn test_record_from_message() {
        let record = LogRecord::from_message(&sample());
        assert_eq!(record.timestamp, "2025-01-08T10:30:45.000Z");
        assert_eq!(record.level, "warn");
        assert_eq!(record.tags, vec!["storage"]);
        assert_eq!(record.message, "disk\nalmost full");
    }

    #[test]
    fn test_json_is_single_line() {
        let json = LogRecord::from_message(&sample()).to_json().unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains("\"callSite\":\"disk.rs:12:9\""));
        assert!(!json.contains("\\u001b"));

        let parsed = LogRecord::from_json(&json).unwrap();
        assert_eq!(parsed.message, "disk\nalmost full");
    }
}
