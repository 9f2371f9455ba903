//! Appender trait for transports (log output destinations)

use super::{error::Result, log_level::LogLevel, log_record::LogRecord};

pub trait Appender: Send + Sync {
    fn append(&mut self, record: &LogRecord) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;

    /// Least severe level this transport writes
    fn level(&self) -> LogLevel {
        LogLevel::Silly
    }

    /// A silent transport accepts nothing
    fn is_silent(&self) -> bool {
        false
    }

    fn accepts(&self, record: &LogRecord) -> bool {
        !self.is_silent() && self.level().admits(record.level)
    }
}
