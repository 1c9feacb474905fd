//! File logging example
//!
//! Sets up the process-wide registry, logs through a few named loggers and
//! shows where the daily file ends up.
//!
//! Run with: cargo run --example file_logging

use masterbot_logger::prelude::*;
use masterbot_logger::{debug, exception, info, registry, warning};

fn main() -> Result<()> {
    println!("=== Masterbot Logger - File Logging Example ===\n");

    let config = LoggingConfig::new("logs")
        .with_mode(LogMode::Development)
        .with_retention_days(7)
        .with_console_level(LogLevel::Info)
        .with_file_level(LogLevel::Debug);
    registry::init(config)?;

    let bot = get_logger("bot")?;
    let handlers = get_logger("bot.handlers")?;

    println!("1. Logging to both console and file:");
    bot.info("Bot started");
    debug!(bot, "Debug records only reach the file");
    info!(handlers, "Registered {} command handlers", 12);
    warning!(handlers, "Handler '{}' is slow to respond", "weather");

    println!("\n2. Logging an error with its cause:");
    match "12a".parse::<u32>() {
        Ok(value) => info!(handlers, "Parsed chat id {}", value),
        Err(e) => exception!(handlers, e, "Could not parse chat id '{}'", "12a"),
    }
    handlers.exception("Nothing went wrong here", None);

    println!("\n3. Metrics:");
    let metrics = bot.metrics();
    println!("  logged:   {}", metrics.total_logged());
    println!("  filtered: {}", metrics.filtered_count());

    if let Some(path) = bot.current_log_file() {
        println!("\nCheck '{}' for the full log output", path.display());
    }

    registry::shutdown();
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
