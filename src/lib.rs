//! # Logger Plugin
//!
//! A leveled logging facade driven by configuration.
//!
//! A [`LoggerFacade`] reads the `log` namespace of a [`Configuration`] on
//! first use, builds one transport per entry (`console`, `file`, `memory`, or
//! any kind registered with the [`LoggerRegistry`]), and forwards
//! `silly`/`debug`/`verbose`/`info`/`warn`/`error` calls to the resulting
//! logger.
//!
//! ## Features
//!
//! - **Lazy construction**: nothing is built until the first log call
//! - **Timestamp masks**: `"HH:MM:ss"`, `"isoDateTime"`, `"UTC:yyyy-mm-dd"`, or strftime
//! - **Layered configuration**: deep-merged JSON layers
//! - **Message helpers**: colored paths, file names, numbers and strings
//!
//! ```
//! use logger_plugin::prelude::*;
//! use serde_json::json;
//!
//! let log = LoggerFacade::with_config(JsonConfig::from_value("app", json!({
//!     "log": { "memory": { "level": "info" } }
//! })));
//!
//! log.info("hello")?;
//! log.debug("filtered out")?;
//! assert_eq!(log.registry().memory_sink().lines(), vec!["info: hello"]);
//! # Ok::<(), LoggerError>(())
//! ```

pub mod appenders;
pub mod config;
pub mod core;
pub mod facade;
pub mod helper;
pub mod macros;
pub mod registry;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, FileAppender, MemoryAppender, MemorySink};
    pub use crate::config::{Configuration, GetOptions, JsonConfig};
    pub use crate::core::{
        Appender, Clock, DatePattern, FieldValue, LogContext, LogLevel, LogRecord, Logger,
        LoggerBuilder, LoggerError, LoggerMetrics, ManualClock, OutputFormat, Result,
        SystemClock, TimestampPolicy, TransportFactory, TransportSettings, TransportSpec,
    };
    pub use crate::facade::{prepare_transports, LoggerFacade};
    pub use crate::helper::Helper;
    pub use crate::registry::LoggerRegistry;
}

pub use appenders::{ConsoleAppender, FileAppender, MemoryAppender, MemorySink};
pub use config::{Configuration, GetOptions, JsonConfig};
pub use core::{
    render_timestamp, Appender, Clock, DatePattern, FieldValue, LogContext, LogLevel, LogRecord,
    Logger, LoggerBuilder, LoggerError, LoggerMetrics, ManualClock, OutputFormat, Result,
    SystemClock, TimestampPolicy, TransportFactory, TransportSettings, TransportSpec,
    DEFAULT_TIMESTAMP_FORMAT,
};
pub use facade::{prepare_transports, LoggerFacade};
pub use helper::Helper;
pub use registry::LoggerRegistry;
