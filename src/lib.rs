//! # switchlog
//!
//! Leveled logging facade whose output mechanism can be switched at runtime.
//!
//! ## Key Features
//!
//! - **Loglevels**: nine ordered levels from `verynoisy` to `quiet`, with
//!   name conversion both ways
//! - **Mechanisms**: `null`, `stderr`, `syslog`, plus one caller-supplied
//!   custom mechanism, initialized lazily and torn down on switch-over
//! - **Environment selection**: `SWITCHLOG_LEVEL` and `SWITCHLOG_MECHANISM`
//!   override in-process settings and are kept in sync with them
//! - **Override function**: route every surviving message to your own code
//!
//! ## Example
//!
//! ```rust,no_run
//! use switchlog::LogLevel;
//!
//! switchlog::global::set_level(LogLevel::Notice)?;
//! switchlog::global::set_mechanism("stderr")?;
//!
//! switchlog::debug!("suppressed, debug is noisier than notice");
//! switchlog::warning!("disk {}% full", 91);   // "warning: disk 91% full"
//! # Ok::<(), switchlog::LogError>(())
//! ```
//!
//! For an isolated facility (tests, embedded use) build a [`Logger`] over a
//! [`MemoryEnv`] instead of using the global one.

// Allow missing errors documentation - errors are self-documenting via type signatures
#![allow(clippy::missing_errors_doc)]

// Logging utilities (re-exports tracing with log_* naming) - internal only
pub(crate) mod logging;

mod macros;

pub mod config;
pub mod env;
pub mod error;
pub mod global;
pub mod level;
pub mod logger;
pub mod mechanism;
pub mod registry;

#[cfg(test)]
pub mod tests;

// Re-export main types
pub use config::LoggerConfig;
pub use env::{EnvStore, MemoryEnv, ProcessEnv};
pub use error::{ErrorCategory, LogError, LogResult};
pub use level::{
    is_noisier_than, level_names, level_to_name, name_to_level, print_level_names, LogLevel,
};
pub use logger::{Location, LogRecord, Logger, OverrideFn};
pub use mechanism::{
    Descriptor, Mechanism, NullMechanism, StderrMechanism, SyslogConfig, SyslogMechanism,
};
pub use registry::MechanismRegistry;
