//! Appender implementations (built-in transports)

pub mod console;
pub mod file;
pub mod memory;

pub use console::ConsoleAppender;
pub use file::FileAppender;
pub use memory::{MemoryAppender, MemorySink};

pub use crate::core::Appender;
