//! Mechanism switching example - one program, output routed at runtime.
//!
//! This example demonstrates:
//! - Listing the available mechanisms
//! - Switching between `stderr`, `null` and `syslog` while logging
//! - Letting `SWITCHLOG_MECHANISM` pick the mechanism from outside
//! - Handling a failed switch and recovering with `clear_mechanism`
//!
//! # Running
//!
//! ```bash
//! cargo run --example mechanism_switching
//!
//! # Print the mechanism list and fall back to the default
//! SWITCHLOG_MECHANISM=list cargo run --example mechanism_switching
//!
//! # Only errors
//! SWITCHLOG_LEVEL=error cargo run --example mechanism_switching
//! ```

use switchlog::{global, LogError, LogLevel};

fn main() -> anyhow::Result<()> {
    print!("Available mechanisms: ");
    global::print_mechanism_names();
    print!("Available levels: ");
    switchlog::print_level_names();

    // Whatever the environment selected goes first
    switchlog::notice!("Starting with level {}", global::level());

    global::set_mechanism("stderr")?;
    switchlog::warning!("This goes to standard error");
    switchlog::info!("So does this, without a prefix");

    global::set_mechanism("null")?;
    switchlog::error!("Nobody will ever read this");

    match global::set_mechanism("syslog") {
        Ok(()) => switchlog::notice!("Hello from switchlog, check your system log"),
        Err(e @ LogError::InitFailed { .. }) => {
            eprintln!("Syslog unavailable ({e}), messages are dropped until the next switch");
        }
        Err(e) => return Err(e.into()),
    }

    if let Err(e) = global::set_mechanism("carrier-pigeon") {
        eprintln!("Switch failed: {e} (category {:?})", e.category());
    }
    switchlog::error!("Dropped, no mechanism is current");

    global::clear_mechanism()?;
    global::set_level(LogLevel::Debug)?;
    switchlog::debug!("Back on the default mechanism with call-site details");

    Ok(())
}
