//! Logging macros for ergonomic log message formatting.
//!
//! Every macro takes a [`LoggerFacade`](crate::LoggerFacade) (or anything
//! with a `log_at(level, message)` method) followed by `format!` arguments,
//! and evaluates to the `Result<()>` of the logging call.
//!
//! # Examples
//!
//! ```
//! use logger_plugin::prelude::*;
//! use logger_plugin::info;
//! use serde_json::json;
//!
//! let log = LoggerFacade::with_config(JsonConfig::from_value("svc", json!({
//!     "log": { "memory": {} }
//! })));
//!
//! let port = 8080;
//! info!(log, "Server listening on port {}", port)?;
//! assert_eq!(log.registry().memory_sink().lines(), vec!["info: Server listening on port 8080"]);
//! # Ok::<(), LoggerError>(())
//! ```

/// Log a message at an explicit level.
///
/// ```
/// # use logger_plugin::prelude::*;
/// # let log = LoggerFacade::with_config(JsonConfig::new("svc"));
/// use logger_plugin::log;
/// log!(log, LogLevel::Warn, "Error code: {}", 500).unwrap();
/// ```
#[macro_export]
macro_rules! log {
    ($facade:expr, $level:expr, $($arg:tt)+) => {
        $facade.log_at($level, format!($($arg)+))
    };
}

#[macro_export]
macro_rules! silly {
    ($facade:expr, $($arg:tt)+) => {
        $crate::log!($facade, $crate::LogLevel::Silly, $($arg)+)
    };
}

#[macro_export]
macro_rules! debug {
    ($facade:expr, $($arg:tt)+) => {
        $crate::log!($facade, $crate::LogLevel::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! verbose {
    ($facade:expr, $($arg:tt)+) => {
        $crate::log!($facade, $crate::LogLevel::Verbose, $($arg)+)
    };
}

/// Log an info-level message.
///
/// ```
/// # use logger_plugin::prelude::*;
/// # let log = LoggerFacade::with_config(JsonConfig::new("svc"));
/// use logger_plugin::info;
/// info!(log, "Processing {} items", 100).unwrap();
/// ```
#[macro_export]
macro_rules! info {
    ($facade:expr, $($arg:tt)+) => {
        $crate::log!($facade, $crate::LogLevel::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! warn {
    ($facade:expr, $($arg:tt)+) => {
        $crate::log!($facade, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// ```
/// # use logger_plugin::prelude::*;
/// # let log = LoggerFacade::with_config(JsonConfig::new("svc"));
/// use logger_plugin::error;
/// error!(log, "Connection failed: {}", "timeout").unwrap();
/// ```
#[macro_export]
macro_rules! error {
    ($facade:expr, $($arg:tt)+) => {
        $crate::log!($facade, $crate::LogLevel::Error, $($arg)+)
    };
}
