//! Leveled logging facade over a configured logger
//!
//! [`LoggerFacade`] reads the `log` namespace of its [`Configuration`] the
//! first time something is logged, turns every entry into a
//! [`TransportSpec`] (resolving string `timestamp` options into timestamp
//! policies on the way), and registers the resulting logger with its
//! [`LoggerRegistry`] under `<config id><unix millis>`. That logger is then
//! reused for the facade's whole lifetime.

use crate::config::{Configuration, GetOptions};
use crate::core::{
    Clock, LogContext, LogLevel, LogRecord, Logger, LoggerError, Result, SystemClock,
    TransportSpec,
};
use crate::helper::Helper;
use crate::registry::LoggerRegistry;
use parking_lot::ReentrantMutex;
use serde_json::Value;
use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;

/// Configuration namespace holding the transports
pub const LOG_NAMESPACE: &str = "log";

/// Turn the `log` namespace into transport specs
///
/// `null` (namespace absent) yields no transports; anything but an object is
/// a configuration error.
pub fn prepare_transports(log_options: Value) -> Result<Vec<TransportSpec>> {
    match log_options {
        Value::Null => Ok(Vec::new()),
        Value::Object(entries) => entries
            .into_iter()
            .map(|(name, options)| TransportSpec::from_value(name, options))
            .collect(),
        other => Err(LoggerError::config(
            LOG_NAMESPACE,
            format!("expected an object of transports, found {}", other),
        )),
    }
}

/// Identifier a logger is registered under
pub fn logger_id(config_id: &str, now_millis: i64) -> String {
    format!("{}{}", config_id, now_millis)
}

/// # Example
///
/// ```
/// use logger_plugin::prelude::*;
/// use serde_json::json;
///
/// let registry = LoggerRegistry::shared();
/// let config = JsonConfig::from_value("app", json!({
///     "log": { "memory": { "level": "debug", "timestamp": "HH:MM:ss" } }
/// }));
///
/// let log = LoggerFacade::new(config, registry.clone());
/// log.info("hello")?;
/// log.debug(format!("loaded {}", log.helper().number(3)))?;
///
/// let records = registry.memory_sink().records();
/// assert_eq!(records[0].level, LogLevel::Info);
/// assert_eq!(records[0].message, "hello");
/// # Ok::<(), LoggerError>(())
/// ```
pub struct LoggerFacade<C: Configuration> {
    config: C,
    registry: Arc<LoggerRegistry>,
    clock: Arc<dyn Clock>,
    slot: ReentrantMutex<RefCell<LoggerSlot>>,
    helper: Helper,
}

#[derive(Default)]
struct LoggerSlot {
    logger: Option<Arc<Logger>>,
    building: bool,
}

/// Clears `building` even if a transport factory panics
struct BuildGuard<'a>(&'a RefCell<LoggerSlot>);

impl Drop for BuildGuard<'_> {
    fn drop(&mut self) {
        self.0.borrow_mut().building = false;
    }
}

impl<C: Configuration> LoggerFacade<C> {
    pub fn new(config: C, registry: Arc<LoggerRegistry>) -> Self {
        Self {
            config,
            registry,
            clock: Arc::new(SystemClock),
            slot: ReentrantMutex::new(RefCell::new(LoggerSlot::default())),
            helper: Helper,
        }
    }

    /// A facade with a registry of its own
    pub fn with_config(config: C) -> Self {
        Self::new(config, LoggerRegistry::shared())
    }

    /// Use `clock` for logger ids and record timestamps
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn registry(&self) -> &Arc<LoggerRegistry> {
        &self.registry
    }

    pub fn helper(&self) -> &Helper {
        &self.helper
    }

    /// Id of the logger, once it has been built
    pub fn logger_id(&self) -> Option<String> {
        let guard = self.slot.lock();
        let slot = guard.borrow();
        slot.logger.as_ref().map(|logger| logger.id().to_string())
    }

    /// The facade's logger, built on first use
    ///
    /// Built at most once: later calls return the same `Arc` even if the
    /// configuration changed in between. A failed build caches nothing, so
    /// the next call tries again.
    ///
    /// Other threads wait for a build in progress. A call made from the
    /// building thread itself (a transport factory logging through this
    /// facade) fails with [`LoggerError::ReentrantBuild`].
    pub fn get_logger(&self) -> Result<Arc<Logger>> {
        let guard = self.slot.lock();
        {
            let mut slot = guard.borrow_mut();
            if let Some(ref logger) = slot.logger {
                return Ok(Arc::clone(logger));
            }
            if slot.building {
                return Err(LoggerError::reentrant_build(self.config.id()));
            }
            slot.building = true;
        }

        let built = {
            let _building = BuildGuard(&*guard);
            self.build_logger()
        };
        let logger = built?;
        guard.borrow_mut().logger = Some(Arc::clone(&logger));
        Ok(logger)
    }

    fn build_logger(&self) -> Result<Arc<Logger>> {
        let log_options = self
            .config
            .get(LOG_NAMESPACE, GetOptions::recursive())?;
        let specs = prepare_transports(log_options)?;

        let id = logger_id(&self.config.id(), self.clock.now().timestamp_millis());
        self.registry.add(id, specs)
    }

    /// Forward a record to the logger, building it first if needed
    pub fn log(&self, record: LogRecord) -> Result<()> {
        self.get_logger()?.log(record)
    }

    pub fn log_at(&self, level: LogLevel, message: impl Into<String>) -> Result<()> {
        self.log(self.record(level, message))
    }

    /// Log with structured context fields
    pub fn log_with_context(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        context: LogContext,
    ) -> Result<()> {
        self.log(self.record(level, message).with_fields(context))
    }

    fn record(&self, level: LogLevel, message: impl Into<String>) -> LogRecord {
        LogRecord::new(level, message).at(self.clock.now())
    }

    #[inline]
    pub fn silly(&self, message: impl Into<String>) -> Result<()> {
        self.log_at(LogLevel::Silly, message)
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) -> Result<()> {
        self.log_at(LogLevel::Debug, message)
    }

    #[inline]
    pub fn verbose(&self, message: impl Into<String>) -> Result<()> {
        self.log_at(LogLevel::Verbose, message)
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) -> Result<()> {
        self.log_at(LogLevel::Info, message)
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) -> Result<()> {
        self.log_at(LogLevel::Warn, message)
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) -> Result<()> {
        self.log_at(LogLevel::Error, message)
    }

    /// Helper for structured info logging
    pub fn info_with_context(&self, message: impl Into<String>, context: LogContext) -> Result<()> {
        self.log_with_context(LogLevel::Info, message, context)
    }

    /// Helper for structured error logging
    pub fn error_with_context(
        &self,
        message: impl Into<String>,
        context: LogContext,
    ) -> Result<()> {
        self.log_with_context(LogLevel::Error, message, context)
    }
}

impl<C: Configuration> fmt::Debug for LoggerFacade<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerFacade")
            .field("config_id", &self.config.id())
            .field("logger_id", &self.logger_id())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JsonConfig;
    use crate::core::{ManualClock, TimestampPolicy};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn clock_at(millis: i64) -> ManualClock {
        ManualClock::new(Utc.timestamp_millis_opt(millis).unwrap())
    }

    fn facade(log: Value) -> LoggerFacade<JsonConfig> {
        LoggerFacade::with_config(JsonConfig::from_value("app", json!({ "log": log })))
    }

    #[test]
    fn test_prepare_transports() {
        let specs = prepare_transports(json!({
            "console": { "timestamp": "HH:MM:ss", "colorize": "true" },
            "memory": { "timestamp": false }
        }))
        .unwrap();

        assert_eq!(specs.len(), 2);
        let console = specs.iter().find(|s| s.name() == "console").unwrap();
        assert!(console.timestamp().is_formatted());
        let memory = specs.iter().find(|s| s.name() == "memory").unwrap();
        assert_eq!(memory.timestamp(), &TimestampPolicy::Raw(Some(json!(false))));

        assert!(prepare_transports(Value::Null).unwrap().is_empty());
        assert!(prepare_transports(json!([1, 2])).is_err());
    }

    #[test]
    fn test_logger_id_concatenates() {
        assert_eq!(logger_id("app", 1_700_000_000_123), "app1700000000123");
    }

    #[test]
    fn test_logger_is_built_lazily() {
        let facade = facade(json!({ "memory": {} }));
        assert!(facade.logger_id().is_none());
        assert!(facade.registry().is_empty());

        facade.info("first").unwrap();
        assert!(facade.logger_id().unwrap().starts_with("app"));
        assert_eq!(facade.registry().len(), 1);
    }

    #[test]
    fn test_get_logger_is_memoized() {
        let facade = facade(json!({ "memory": {} }));
        let first = facade.get_logger().unwrap();
        let second = facade.get_logger().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_memoized_logger_ignores_later_config_changes() {
        let config = Arc::new(JsonConfig::from_value("app", json!({ "log": { "memory": {} } })));
        let facade = LoggerFacade::with_config(Arc::clone(&config));

        let first = facade.get_logger().unwrap();
        assert_eq!(first.transport_count(), 1);

        config.set(
            "log",
            json!({ "memory": {}, "extra": { "type": "memory", "level": "silly" } }),
        );
        let second = facade.get_logger().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.transport_count(), 1);
        assert_eq!(facade.registry().len(), 1);
    }

    #[test]
    fn test_reentrant_build_is_an_error() {
        use crate::appenders::{MemoryAppender, MemorySink};
        use crate::core::Appender;
        use parking_lot::Mutex;

        type Shared = Arc<Mutex<Option<Arc<LoggerFacade<JsonConfig>>>>>;
        let facade_slot: Shared = Arc::default();
        let inner_result: Arc<Mutex<Option<bool>>> = Arc::default();

        let registry = LoggerRegistry::shared();
        let slot = Arc::clone(&facade_slot);
        let observed = Arc::clone(&inner_result);
        registry.register_transport(
            "chatty",
            Arc::new(move |spec: &TransportSpec| -> Result<Box<dyn Appender>> {
                let facade = slot.lock().clone();
                if let Some(facade) = facade {
                    let result = facade.info("from factory");
                    *observed.lock() =
                        Some(matches!(result, Err(LoggerError::ReentrantBuild { .. })));
                }
                Ok(Box::new(MemoryAppender::from_spec(spec, MemorySink::new())?))
            }),
        );

        let facade = Arc::new(LoggerFacade::new(
            JsonConfig::from_value("app", json!({ "log": { "chatty": {} } })),
            registry,
        ));
        *facade_slot.lock() = Some(Arc::clone(&facade));

        facade.info("outer").unwrap();
        assert_eq!(*inner_result.lock(), Some(true));
        assert!(facade.logger_id().is_some());

        // Later calls see the finished logger
        facade.info("again").unwrap();
        facade_slot.lock().take();
    }

    #[test]
    fn test_logger_id_uses_clock() {
        let facade = facade(json!({})).with_clock(Arc::new(clock_at(1_234)));
        let logger = facade.get_logger().unwrap();
        assert_eq!(logger.id(), "app1234");
        assert_eq!(logger.transport_count(), 0);
    }

    #[test]
    fn test_leveled_methods_forward_their_level() {
        let facade = facade(json!({ "memory": { "level": "silly" } }));
        facade.silly("s").unwrap();
        facade.debug("d").unwrap();
        facade.verbose("v").unwrap();
        facade.info("i").unwrap();
        facade.warn("w").unwrap();
        facade.error("e").unwrap();

        let levels: Vec<LogLevel> = facade
            .registry()
            .memory_sink()
            .records()
            .into_iter()
            .map(|r| r.level)
            .collect();
        assert_eq!(
            levels,
            vec![
                LogLevel::Silly,
                LogLevel::Debug,
                LogLevel::Verbose,
                LogLevel::Info,
                LogLevel::Warn,
                LogLevel::Error,
            ]
        );
    }

    #[test]
    fn test_records_are_stamped_by_clock() {
        let clock = clock_at(86_400_000);
        let facade = facade(json!({ "memory": { "timestamp": "UTC:yyyy-mm-dd HH:MM" } }))
            .with_clock(Arc::new(clock));

        facade
            .info_with_context("ctx", LogContext::new().with_field("k", "v"))
            .unwrap();

        assert_eq!(
            facade.registry().memory_sink().lines(),
            vec!["1970-01-02 00:00 - info: ctx k=v"]
        );
    }

    #[test]
    fn test_config_error_propagates_and_is_not_cached() {
        let config = Arc::new(JsonConfig::from_value("app", json!({ "log": "console" })));
        let facade = LoggerFacade::with_config(Arc::clone(&config));

        let err = facade.info("boom").unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
        assert!(facade.logger_id().is_none());

        config.set("log", json!({ "memory": {} }));
        facade.info("recovered").unwrap();
        assert_eq!(facade.registry().memory_sink().len(), 1);
    }
}
