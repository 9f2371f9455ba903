//! Registry of named loggers
//!
//! The registry is an ordinary value shared by `Arc`, not process-global
//! state: every [`LoggerFacade`](crate::LoggerFacade) holds a reference to the
//! registry it registers its logger with, and other code looks loggers up
//! through the same reference.

use crate::appenders::{ConsoleAppender, FileAppender, MemoryAppender, MemorySink};
use crate::core::{Appender, Logger, LoggerError, Result, TransportFactory, TransportSpec};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

pub struct LoggerRegistry {
    loggers: RwLock<HashMap<String, Arc<Logger>>>,
    factories: RwLock<HashMap<String, TransportFactory>>,
    memory: MemorySink,
}

impl LoggerRegistry {
    /// A registry knowing the `console`, `file` and `memory` transports
    ///
    /// Every `memory` transport built by the default factory writes into
    /// [`LoggerRegistry::memory_sink`].
    pub fn new() -> Self {
        let memory = MemorySink::new();
        let registry = Self {
            loggers: RwLock::new(HashMap::new()),
            factories: RwLock::new(HashMap::new()),
            memory: memory.clone(),
        };

        registry.register_transport(
            "console",
            Arc::new(|spec: &TransportSpec| -> Result<Box<dyn Appender>> {
                Ok(Box::new(ConsoleAppender::from_spec(spec)?))
            }),
        );
        registry.register_transport(
            "file",
            Arc::new(|spec: &TransportSpec| -> Result<Box<dyn Appender>> {
                Ok(Box::new(FileAppender::from_spec(spec)?))
            }),
        );
        registry.register_transport("memory", MemoryAppender::factory(memory));
        registry
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Register (or replace) the factory for a transport kind
    ///
    /// Factories run while a facade builds its logger. Logging through that
    /// same facade from inside a factory returns
    /// [`LoggerError::ReentrantBuild`] instead of a logger.
    pub fn register_transport(&self, kind: impl Into<String>, factory: TransportFactory) {
        self.factories.write().insert(kind.into(), factory);
    }

    pub fn has_transport(&self, kind: &str) -> bool {
        self.factories.read().contains_key(kind)
    }

    /// Retrieve-or-create the logger registered under `id`
    ///
    /// When `id` is already registered the existing logger is returned and
    /// `specs` are ignored. Otherwise every spec is built into a transport;
    /// the first spec that fails aborts registration and nothing is stored.
    pub fn add(&self, id: impl Into<String>, specs: Vec<TransportSpec>) -> Result<Arc<Logger>> {
        let id = id.into();
        if let Some(existing) = self.get(&id) {
            return Ok(existing);
        }

        let appenders = self.build_transports(&specs)?;
        let logger = Arc::new(Logger::from_transports(id.clone(), specs, appenders));

        let mut loggers = self.loggers.write();
        Ok(Arc::clone(loggers.entry(id).or_insert(logger)))
    }

    fn build_transports(&self, specs: &[TransportSpec]) -> Result<Vec<Box<dyn Appender>>> {
        let factories = self.factories.read();
        specs
            .iter()
            .map(|spec| {
                let factory = factories
                    .get(spec.kind())
                    .ok_or_else(|| LoggerError::unknown_transport(spec.name(), spec.kind()))?;
                factory(spec)
            })
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<Arc<Logger>> {
        self.loggers.read().get(id).cloned()
    }

    pub fn has(&self, id: &str) -> bool {
        self.loggers.read().contains_key(id)
    }

    /// Remove and close the logger registered under `id`
    ///
    /// Returns `false` when no such logger exists.
    pub fn close(&self, id: &str) -> Result<bool> {
        let removed = self.loggers.write().remove(id);
        match removed {
            Some(logger) => {
                logger.close()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Close every registered logger, reporting the first failure
    pub fn clear(&self) -> Result<()> {
        let drained: Vec<Arc<Logger>> = self.loggers.write().drain().map(|(_, l)| l).collect();
        let mut first_error = None;
        for logger in drained {
            if let Err(e) = logger.close() {
                eprintln!("[LOGGER ERROR] Failed to close logger '{}': {}", logger.id(), e);
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    pub fn len(&self) -> usize {
        self.loggers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.read().is_empty()
    }

    /// Registered ids, sorted
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.loggers.read().keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Buffer shared by the default `memory` transports
    pub fn memory_sink(&self) -> &MemorySink {
        &self.memory
    }
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LoggerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut transports: Vec<String> = self.factories.read().keys().cloned().collect();
        transports.sort();
        f.debug_struct("LoggerRegistry")
            .field("loggers", &self.ids())
            .field("transports", &transports)
            .finish()
    }
}
