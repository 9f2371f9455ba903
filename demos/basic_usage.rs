//! Basic facade usage example
//!
//! Demonstrates a console transport configured from JSON, the leveled
//! methods, the formatting macros and the message helpers.
//!
//! Run with: cargo run --example basic_usage

use logger_plugin::prelude::*;
use logger_plugin::{info, warn};
use serde_json::json;

fn main() -> Result<()> {
    println!("=== Logger Plugin - Basic Usage Example ===\n");

    let config = JsonConfig::from_value(
        "demo",
        json!({
            "log": {
                "console": { "level": "silly", "timestamp": "HH:MM:ss", "colorize": "true" }
            }
        }),
    );
    let log = LoggerFacade::with_config(config);

    println!("1. Logging at different levels:");
    log.silly("This is a silly message")?;
    log.debug("This is a debug message")?;
    log.verbose("This is a verbose message")?;
    log.info("This is an info message")?;
    log.warn("This is a warning message")?;
    log.error("This is an error message")?;

    println!("\n2. Formatting macros and helpers:");
    let helper = log.helper();
    info!(log, "Loaded {} plugins from {}", helper.number(3), helper.path("demos", None))?;
    warn!(log, "Option {} is deprecated", helper.string("colorize"))?;
    log.info_with_context(
        "Request processed",
        LogContext::new().with_field("status", 200).with_field("path", "/api"),
    )?;

    println!("\n3. Logger registered as {:?}", log.logger_id());

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
