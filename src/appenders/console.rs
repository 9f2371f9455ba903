//! Console appender implementation

use crate::core::{
    Appender, LogLevel, LogRecord, OutputFormat, Result, TimestampPolicy, TransportSettings,
    TransportSpec,
};

pub struct ConsoleAppender {
    name: String,
    settings: TransportSettings,
    output_format: OutputFormat,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self::with_settings("console", TransportSettings::default())
    }

    pub fn with_settings(name: impl Into<String>, settings: TransportSettings) -> Self {
        Self {
            name: name.into(),
            output_format: OutputFormat::from_settings(&settings),
            settings,
        }
    }

    /// Build from a `console` entry of the `log` configuration
    ///
    /// # Example
    ///
    /// ```
    /// use logger_plugin::appenders::ConsoleAppender;
    /// use logger_plugin::core::TransportSpec;
    /// use serde_json::json;
    ///
    /// let spec = TransportSpec::from_value("console", json!({
    ///     "level": "debug",
    ///     "timestamp": "HH:MM:ss",
    ///     "colorize": "true",
    /// })).unwrap();
    /// let appender = ConsoleAppender::from_spec(&spec).unwrap();
    /// ```
    pub fn from_spec(spec: &TransportSpec) -> Result<Self> {
        let settings = TransportSettings::from_spec(spec, false)?;
        Ok(Self::with_settings(spec.name(), settings))
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.settings.level = level;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.settings.colorize = use_colors;
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self, policy: TimestampPolicy) -> Self {
        self.settings.timestamp = policy;
        self
    }

    pub fn settings(&self) -> &TransportSettings {
        &self.settings
    }

    fn format(&self, record: &LogRecord) -> String {
        self.output_format.format(record, &self.settings)
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, record: &LogRecord) -> Result<()> {
        let output = self.format(record);

        // Route errors to stderr, others to stdout
        match record.level {
            LogLevel::Error => eprintln!("{}", output),
            _ => println!("{}", output),
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        use std::io::Write;
        // Flush both stdout and stderr since we write to both
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn level(&self) -> LogLevel {
        self.settings.level
    }

    fn is_silent(&self) -> bool {
        self.settings.silent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_spec_reads_common_options() {
        let spec = TransportSpec::from_value(
            "console",
            json!({ "level": "verbose", "colorize": true, "timestamp": "HH:MM" }),
        )
        .unwrap();
        let appender = ConsoleAppender::from_spec(&spec).unwrap();

        assert_eq!(appender.name(), "console");
        assert_eq!(appender.level(), LogLevel::Verbose);
        assert!(appender.settings().colorize);
        assert!(!appender.settings().json);
        assert!(appender.settings().timestamp.is_formatted());
    }

    #[test]
    fn test_silent_accepts_nothing() {
        let spec = TransportSpec::from_value("console", json!({ "silent": true })).unwrap();
        let appender = ConsoleAppender::from_spec(&spec).unwrap();
        assert!(!appender.accepts(&LogRecord::new(LogLevel::Error, "x")));
    }

    #[test]
    fn test_append_and_flush() {
        let mut appender = ConsoleAppender::new().with_colors(false);
        appender
            .append(&LogRecord::new(LogLevel::Info, "console output"))
            .unwrap();
        appender.flush().unwrap();
    }
}
