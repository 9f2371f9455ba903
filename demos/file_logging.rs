//! File logging example
//!
//! Demonstrates console and file transports built from a layered
//! configuration: the base layer sets defaults, the override layer raises
//! the console threshold.
//!
//! Run with: cargo run --example file_logging

use logger_plugin::prelude::*;
use serde_json::json;

fn main() -> Result<()> {
    println!("=== Logger Plugin - File Logging Example ===\n");

    let config = JsonConfig::from_json_str(
        "file-demo",
        r#"{
            "log": {
                "console": { "level": "debug", "timestamp": "isoTime", "colorize": "true" },
                "file": { "filename": "application.log", "level": "debug", "timestamp": "isoUtcDateTime" }
            }
        }"#,
    )?
    .with_layer(json!({ "log": { "console": { "level": "info" } } }));

    let log = LoggerFacade::with_config(config);

    println!("1. Logging to both console and file:");
    log.info("Application started")?;
    log.debug("Loading configuration... (file only)")?;
    log.warn("Using default settings for some options")?;
    log.error("Failed to load optional plugin")?;

    println!("\n2. Performing some operations:");
    for i in 1..=5 {
        log.info(format!("Processing item {}/5", i))?;
    }

    let logger = log.get_logger()?;
    logger.flush()?;

    let metrics = logger.metrics();
    println!(
        "\n3. Logged {} records ({} dropped)",
        metrics.total_logged(),
        metrics.dropped_count()
    );

    println!("\n=== Example completed successfully! ===");
    println!("Check 'application.log' for the full log output");

    Ok(())
}
