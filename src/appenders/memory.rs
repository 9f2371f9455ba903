//! In-memory appender
//!
//! Keeps every accepted record, and the line it would have printed, in a
//! shared [`MemorySink`]. Handy for embedding and for asserting on output.

use crate::core::{
    Appender, LogLevel, LogRecord, OutputFormat, Result, TransportFactory, TransportSettings,
    TransportSpec,
};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Default)]
struct MemoryBuffer {
    records: Vec<LogRecord>,
    lines: Vec<String>,
}

/// Shared buffer written by one or more [`MemoryAppender`]s
///
/// Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    inner: Arc<Mutex<MemoryBuffer>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.inner.lock().records.clone()
    }

    /// Rendered lines, in the order they were written
    pub fn lines(&self) -> Vec<String> {
        self.inner.lock().lines.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        let mut buffer = self.inner.lock();
        buffer.records.clear();
        buffer.lines.clear();
    }

    fn push(&self, record: LogRecord, line: String) {
        let mut buffer = self.inner.lock();
        buffer.records.push(record);
        buffer.lines.push(line);
    }
}

pub struct MemoryAppender {
    name: String,
    settings: TransportSettings,
    output_format: OutputFormat,
    sink: MemorySink,
}

impl MemoryAppender {
    /// A memory transport accepting every level
    pub fn new(sink: MemorySink) -> Self {
        let settings = TransportSettings {
            level: LogLevel::Silly,
            ..TransportSettings::default()
        };
        Self::with_settings("memory", settings, sink)
    }

    pub fn with_settings(
        name: impl Into<String>,
        settings: TransportSettings,
        sink: MemorySink,
    ) -> Self {
        Self {
            name: name.into(),
            output_format: OutputFormat::from_settings(&settings),
            settings,
            sink,
        }
    }

    /// Build from a `memory` entry of the `log` configuration
    pub fn from_spec(spec: &TransportSpec, sink: MemorySink) -> Result<Self> {
        let settings = TransportSettings::from_spec(spec, false)?;
        Ok(Self::with_settings(spec.name(), settings, sink))
    }

    /// A transport factory writing every memory transport into `sink`
    ///
    /// ```
    /// use logger_plugin::prelude::*;
    ///
    /// let sink = MemorySink::new();
    /// let registry = LoggerRegistry::new();
    /// registry.register_transport("capture", MemoryAppender::factory(sink.clone()));
    /// ```
    pub fn factory(sink: MemorySink) -> TransportFactory {
        Arc::new(move |spec: &TransportSpec| -> Result<Box<dyn Appender>> {
            Ok(Box::new(MemoryAppender::from_spec(spec, sink.clone())?))
        })
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.settings.level = level;
        self
    }

    pub fn sink(&self) -> &MemorySink {
        &self.sink
    }
}

impl Appender for MemoryAppender {
    fn append(&mut self, record: &LogRecord) -> Result<()> {
        let line = self.output_format.format(record, &self.settings);
        self.sink.push(record.clone(), line);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
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
