//! Override function example - take over every message yourself.
//!
//! This example demonstrates:
//! - Registering a closure that receives level, file, function, line and message
//! - Carrying context into it through captures instead of a user-data pointer
//! - Level filtering still applying before the override runs
//! - Clearing the override to return to the mechanisms
//!
//! # Running
//!
//! ```bash
//! cargo run --example override_function
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use switchlog::{global, LogLevel};

fn load_settings(path: &str) {
    switchlog::info!("Reading config file \"{}\"...", path);
    if let Err(e) = std::fs::read_to_string(path) {
        switchlog::log_io_error!(path, e);
    }
}

fn main() -> anyhow::Result<()> {
    let prefix = String::from("demo");
    let count = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&count);

    global::register_override(move |record| {
        counter.fetch_add(1, Ordering::Relaxed);
        println!(
            "{prefix} | {:<7} | {}:{} {} | {}",
            record.level, record.file, record.line, record.func, record.message
        );
    })?;

    global::set_level(LogLevel::Info)?;
    load_settings("/nonexistent/settings.json");
    switchlog::debug!("Filtered out before the override sees it");
    switchlog::not_implemented!();

    println!("override saw {} messages", count.load(Ordering::Relaxed));

    global::clear_override();
    switchlog::warning!("Back on the regular mechanism");
    Ok(())
}
