//! Error types for the logger

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// A logging call or configuration names a level the active style lacks
    #[error("Unknown level '{name}' in the active style")]
    UnknownLevel { name: String },

    /// A level references a color the renderer doesn't know
    #[error("Unknown color '{color}' (expected one of: {})", crate::core::level::LevelColor::NAMES.join(", "))]
    UnknownColor { color: String },

    /// File sink could not be opened at construction
    #[error("Failed to open {sink} sink at '{path}': {source}")]
    SinkOpen {
        sink: String,
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Write to an already open sink failed
    #[error("Failed to write to {sink} sink: {source}")]
    SinkWrite {
        sink: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// No worker could be started for a pending value
    #[error("Failed to schedule pending value: {source}")]
    PendingSpawn {
        #[source]
        source: std::io::Error,
    },

    /// The process-wide logger was initialized twice
    #[error("Global logger already initialized")]
    AlreadyInitialized,

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl LoggerError {
    /// Create an unknown level error
    pub fn unknown_level(name: impl Into<String>) -> Self {
        LoggerError::UnknownLevel { name: name.into() }
    }

    /// Create an unknown color error
    pub fn unknown_color(color: impl Into<String>) -> Self {
        LoggerError::UnknownColor {
            color: color.into(),
        }
    }

    /// Create a sink open error
    pub fn sink_open(
        sink: impl Into<String>,
        path: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::SinkOpen {
            sink: sink.into(),
            path: path.into(),
            source,
        }
    }

    /// Create a sink write error
    pub fn sink_write(sink: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::SinkWrite {
            sink: sink.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::unknown_level("shout");
        assert!(matches!(err, LoggerError::UnknownLevel { .. }));

        let err = LoggerError::config("levels", "style has no levels");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = LoggerError::sink_open("log file", "/root/app.jsonl", io_err);
        assert!(matches!(err, LoggerError::SinkOpen { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::unknown_level("shout");
        assert_eq!(err.to_string(), "Unknown level 'shout' in the active style");

        let err = LoggerError::config("levels", "duplicate level 'info'");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for levels: duplicate level 'info'"
        );

        let err = LoggerError::unknown_color("pink");
        assert!(err.to_string().starts_with("Unknown color 'pink'"));
        assert!(err.to_string().contains("bgMagenta"));
    }

    #[test]
    fn test_sink_write_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err = LoggerError::sink_write("console", io_err);

        assert!(err.to_string().contains("console"));
        assert!(err.to_string().contains("pipe closed"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
