//! Error types for the logger plugin

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Configuration source could not be parsed
    #[error("Failed to parse configuration from '{source_name}': {message}")]
    ConfigParse {
        source_name: String,
        message: String,
    },

    /// Transport kind with no registered factory
    #[error("Unknown transport '{kind}' (configured as '{name}')")]
    UnknownTransport { name: String, kind: String },

    /// File appender error with path
    #[error("File appender error for '{path}': {message}")]
    FileAppenderError { path: String, message: String },

    /// Logger has been closed
    #[error("Logger '{id}' is closed")]
    LoggerClosed { id: String },

    /// The logger was requested again while it was being built
    #[error("Logger for config '{config_id}' requested while it is being built")]
    ReentrantBuild { config_id: String },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
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

    /// Create a configuration parse error
    pub fn config_parse(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::ConfigParse {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    pub fn unknown_transport(name: impl Into<String>, kind: impl Into<String>) -> Self {
        LoggerError::UnknownTransport {
            name: name.into(),
            kind: kind.into(),
        }
    }

    /// Create a file appender error
    pub fn file_appender(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileAppenderError {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn closed(id: impl Into<String>) -> Self {
        LoggerError::LoggerClosed { id: id.into() }
    }

    pub fn reentrant_build(config_id: impl Into<String>) -> Self {
        LoggerError::ReentrantBuild {
            config_id: config_id.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::config("log", "expected an object");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = LoggerError::file_appender("/var/log/app.log", "Permission denied");
        assert!(matches!(err, LoggerError::FileAppenderError { .. }));

        let err = LoggerError::unknown_transport("audit", "syslog");
        assert!(matches!(err, LoggerError::UnknownTransport { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::config("transport 'file'", "missing 'filename'");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for transport 'file': missing 'filename'"
        );

        let err = LoggerError::unknown_transport("audit", "syslog");
        assert_eq!(
            err.to_string(),
            "Unknown transport 'syslog' (configured as 'audit')"
        );

        let err = LoggerError::config_parse("app.json", "expected value at line 1");
        assert_eq!(
            err.to_string(),
            "Failed to parse configuration from 'app.json': expected value at line 1"
        );

        assert_eq!(LoggerError::closed("app42").to_string(), "Logger 'app42' is closed");
        assert_eq!(
            LoggerError::reentrant_build("app").to_string(),
            "Logger for config 'app' requested while it is being built"
        );
    }

    #[test]
    fn test_every_variant_has_a_constructor() {
        let io = || std::io::Error::new(std::io::ErrorKind::Other, "x");
        let errors = vec![
            LoggerError::io_operation("op", "msg", io()),
            LoggerError::from(io()),
            LoggerError::from(serde_json::from_str::<serde_json::Value>("{").unwrap_err()),
            LoggerError::config("log", "bad"),
            LoggerError::config_parse("app.json", "bad"),
            LoggerError::unknown_transport("audit", "syslog"),
            LoggerError::file_appender("app.log", "bad"),
            LoggerError::closed("app1"),
            LoggerError::reentrant_build("app"),
            LoggerError::other("x"),
        ];

        // No wildcard arm: a variant nothing can construct fails to compile here
        for err in errors {
            match err {
                LoggerError::IoOperation { .. }
                | LoggerError::IoError(_)
                | LoggerError::JsonError(_)
                | LoggerError::InvalidConfiguration { .. }
                | LoggerError::ConfigParse { .. }
                | LoggerError::UnknownTransport { .. }
                | LoggerError::FileAppenderError { .. }
                | LoggerError::LoggerClosed { .. }
                | LoggerError::ReentrantBuild { .. }
                | LoggerError::Other(_) => {}
            }
        }
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::io_operation("opening log file", "cannot open for append", io_err);

        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("opening log file"));
        assert!(err.to_string().contains("cannot open for append"));
    }
}
