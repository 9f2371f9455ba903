//! Core logger types and traits

pub mod appender;
pub mod clock;
pub mod date_pattern;
pub mod error;
pub mod log_context;
pub mod log_level;
pub mod log_record;
pub mod logger;
pub mod metrics;
pub mod output_format;
pub mod timestamp;
pub mod transport;

pub use appender::Appender;
pub use clock::{Clock, ManualClock, SystemClock};
pub use date_pattern::DatePattern;
pub use error::{LoggerError, Result};
pub use log_context::{FieldValue, LogContext};
pub use log_level::LogLevel;
pub use log_record::LogRecord;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use output_format::OutputFormat;
pub use timestamp::{render_timestamp, TimestampPolicy, DEFAULT_TIMESTAMP_FORMAT};
pub use transport::{TransportFactory, TransportSettings, TransportSpec};
