//! Logger: fans records out to its transports

use super::{
    appender::Appender,
    error::{LoggerError, Result},
    log_level::LogLevel,
    log_record::LogRecord,
    metrics::LoggerMetrics,
    transport::TransportSpec,
};
use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

pub struct Logger {
    id: String,
    appenders: RwLock<Vec<Box<dyn Appender>>>,
    /// Options the transports were built from, empty for hand-built loggers
    specs: Vec<TransportSpec>,
    metrics: LoggerMetrics,
    closed: AtomicBool,
}

impl Logger {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            appenders: RwLock::new(Vec::new()),
            specs: Vec::new(),
            metrics: LoggerMetrics::new(),
            closed: AtomicBool::new(false),
        }
    }

    /// Create a logger from already-built transports and the specs behind them
    pub(crate) fn from_transports(
        id: impl Into<String>,
        specs: Vec<TransportSpec>,
        appenders: Vec<Box<dyn Appender>>,
    ) -> Self {
        Self {
            id: id.into(),
            appenders: RwLock::new(appenders),
            specs,
            metrics: LoggerMetrics::new(),
            closed: AtomicBool::new(false),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn transport_specs(&self) -> &[TransportSpec] {
        &self.specs
    }

    pub fn transport_spec(&self, name: &str) -> Option<&TransportSpec> {
        self.specs.iter().find(|spec| spec.name() == name)
    }

    pub fn transport_count(&self) -> usize {
        self.appenders.read().len()
    }

    pub fn add_appender(&self, appender: Box<dyn Appender>) {
        let mut appenders = self.appenders.write();
        appenders.push(appender);
    }

    /// Dispatch a record to every transport that accepts it
    ///
    /// Transport failures are reported on stderr and counted as dropped; they
    /// do not fail the call. Logging to a closed logger is an error.
    pub fn log(&self, record: LogRecord) -> Result<()> {
        if self.is_closed() {
            return Err(LoggerError::closed(&self.id));
        }

        let mut appenders = self.appenders.write();
        Self::process_sync(&mut appenders, &record, &self.metrics);
        Ok(())
    }

    pub fn log_at(&self, level: LogLevel, message: impl Into<String>) -> Result<()> {
        self.log(LogRecord::new(level, message))
    }

    /// Process a record with per-appender panic isolation
    ///
    /// One failing appender doesn't prevent the others from receiving the
    /// record. Returns true when any appender failed.
    fn process_sync(
        appenders: &mut [Box<dyn Appender>],
        record: &LogRecord,
        metrics: &LoggerMetrics,
    ) -> bool {
        let mut has_error = false;
        let mut accepted = false;

        for (idx, appender) in appenders.iter_mut().enumerate() {
            if !appender.accepts(record) {
                continue;
            }
            accepted = true;

            let append_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                appender.append(record)
            }));

            match append_result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!(
                        "[LOGGER ERROR] Transport #{} ({}) failed: {}",
                        idx,
                        appender.name(),
                        e
                    );
                    has_error = true;
                }
                Err(panic_info) => {
                    eprintln!(
                        "[LOGGER CRITICAL] Transport #{} ({}) panicked: {}. \
                         Other transports continue to function.",
                        idx,
                        appender.name(),
                        panic_message(panic_info.as_ref())
                    );
                    has_error = true;
                }
            }
        }

        if has_error {
            metrics.record_dropped();
        } else if accepted {
            metrics.record_logged();
        } else {
            metrics.record_filtered();
        }

        has_error
    }

    pub fn flush(&self) -> Result<()> {
        let mut appenders = self.appenders.write();
        for appender in appenders.iter_mut() {
            appender.flush()?;
        }
        Ok(())
    }

    /// Flush and detach every transport; later `log` calls fail
    pub fn close(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        let result = self.flush();
        self.appenders.write().clear();
        result
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Get the number of dropped logs
    pub fn dropped_count(&self) -> u64 {
        self.metrics.dropped_count()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use logger_plugin::prelude::*;
    ///
    /// let logger = Logger::builder("app")
    ///     .appender(MemoryAppender::new(MemorySink::new()))
    ///     .build();
    /// assert_eq!(logger.transport_count(), 1);
    /// ```
    #[must_use]
    pub fn builder(id: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(id)
    }
}

fn panic_message(panic_info: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("id", &self.id)
            .field("transports", &self.transport_count())
            .field("closed", &self.is_closed())
            .field("metrics", &self.metrics)
            .finish()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
        }

        let dropped = self.metrics.dropped_count();
        if dropped > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger '{}' shutting down with {} dropped logs (drop rate: {:.2}%)",
                self.id,
                dropped,
                self.metrics.drop_rate()
            );
        }
    }
}

/// Builder for constructing a Logger by hand
pub struct LoggerBuilder {
    id: String,
    appenders: Vec<Box<dyn Appender>>,
}

impl LoggerBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            appenders: Vec::new(),
        }
    }

    /// Add an appender
    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appenders.push(Box::new(appender));
        self
    }

    pub fn build(self) -> Logger {
        Logger::from_transports(self.id, Vec::new(), self.appenders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::{MemoryAppender, MemorySink};

    struct FailingAppender;

    impl Appender for FailingAppender {
        fn append(&mut self, _record: &LogRecord) -> Result<()> {
            Err(LoggerError::other("Simulated failure"))
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    struct PanickingAppender;

    impl Appender for PanickingAppender {
        fn append(&mut self, _record: &LogRecord) -> Result<()> {
            panic!("transport exploded");
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "panicking"
        }
    }

    #[test]
    fn test_log_reaches_memory_transport() {
        let sink = MemorySink::new();
        let logger = Logger::builder("test")
            .appender(MemoryAppender::new(sink.clone()))
            .build();

        logger.log_at(LogLevel::Info, "hello").unwrap();

        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level, LogLevel::Info);
        assert_eq!(records[0].message, "hello");
        assert_eq!(logger.metrics().total_logged(), 1);
    }

    #[test]
    fn test_level_threshold_filters() {
        let sink = MemorySink::new();
        let logger = Logger::builder("test")
            .appender(MemoryAppender::new(sink.clone()).with_level(LogLevel::Warn))
            .build();

        logger.log_at(LogLevel::Info, "ignored").unwrap();
        logger.log_at(LogLevel::Error, "kept").unwrap();

        assert_eq!(sink.len(), 1);
        assert_eq!(logger.metrics().filtered_count(), 1);
    }

    #[test]
    fn test_failing_transport_is_isolated() {
        let sink = MemorySink::new();
        let logger = Logger::builder("test")
            .appender(FailingAppender)
            .appender(PanickingAppender)
            .appender(MemoryAppender::new(sink.clone()))
            .build();

        for _ in 0..3 {
            logger.log_at(LogLevel::Info, "still delivered").unwrap();
        }

        assert_eq!(sink.len(), 3);
        assert_eq!(logger.dropped_count(), 3);
    }

    #[test]
    fn test_close_rejects_further_logs() {
        let logger = Logger::builder("closing")
            .appender(MemoryAppender::new(MemorySink::new()))
            .build();

        logger.close().unwrap();
        assert!(logger.is_closed());
        assert_eq!(logger.transport_count(), 0);
        assert!(matches!(
            logger.log_at(LogLevel::Info, "late"),
            Err(LoggerError::LoggerClosed { .. })
        ));
        // Closing twice is a no-op
        logger.close().unwrap();
    }
}
