//! Process-wide logger
//!
//! One [`Logger`] over the real process environment, created on first use
//! from [`LoggerConfig::from_env`] and guarded by a mutex. Every operation
//! runs inside the lock, so a mechanism switch-over is never observed half
//! done by a concurrent log call.
//!
//! An override function or mechanism that logs through this module while the
//! lock is held would deadlock. Such nested calls are detected per thread and
//! their messages dropped instead.

use crate::config::LoggerConfig;
use crate::error::{LogError, LogResult};
use crate::level::LogLevel;
use crate::logger::{LogRecord, Logger, Location};
use crate::logging::log_warn;
use crate::mechanism::Mechanism;
use once_cell::sync::Lazy;
use std::cell::Cell;
use std::fmt;
use std::sync::{Mutex, PoisonError};

static GLOBAL: Lazy<Mutex<Logger>> = Lazy::new(|| {
    let config = LoggerConfig::from_env().unwrap_or_else(|e| {
        e.report();
        LoggerConfig::default()
    });
    Mutex::new(Logger::new(config))
});

thread_local! {
    static INSIDE_LOGGER: Cell<bool> = const { Cell::new(false) };
}

struct ReentryGuard;

impl ReentryGuard {
    fn enter() -> Option<Self> {
        INSIDE_LOGGER.with(|inside| {
            if inside.replace(true) {
                None
            } else {
                Some(ReentryGuard)
            }
        })
    }
}

impl Drop for ReentryGuard {
    fn drop(&mut self) {
        INSIDE_LOGGER.with(|inside| inside.set(false));
    }
}

/// Run `f` on the global logger.
///
/// Returns `None` when called from inside another global logger operation on
/// the same thread.
pub fn with_logger<R>(f: impl FnOnce(&mut Logger) -> R) -> Option<R> {
    let Some(_guard) = ReentryGuard::enter() else {
        log_warn!("Nested call into the global logger ignored");
        return None;
    };
    let mut logger = GLOBAL.lock().unwrap_or_else(PoisonError::into_inner);
    Some(f(&mut logger))
}

/// Replace the global logger with a fresh one built from `config`.
///
/// The previous logger's current mechanism is deinitialized.
///
/// # Errors
///
/// Returns [`LogError::ConfigurationError`] if `config` fails validation.
pub fn init(config: LoggerConfig) -> LogResult<()> {
    config.validate()?;
    with_logger(|logger| *logger = Logger::new(config)).ok_or_else(LogError::busy)
}

/// Filter, render and route one message through the global logger.
///
/// Use the [`log!`](crate::log) family of macros rather than calling this directly.
pub fn log(level: LogLevel, location: Location, args: fmt::Arguments<'_>) {
    with_logger(|logger| logger.log(level, location, args));
}

/// # Errors
///
/// Returns [`LogError::Busy`] when called from inside another global logger
/// operation on the same thread.
pub fn set_level(level: LogLevel) -> LogResult<()> {
    with_logger(|logger| logger.set_level(level)).ok_or_else(LogError::busy)
}

/// # Errors
///
/// Returns [`LogError::InvalidLevel`] if `level` is outside the operational range.
pub fn set_level_raw(level: i32) -> LogResult<()> {
    with_logger(|logger| logger.set_level_raw(level)).unwrap_or_else(|| Err(LogError::busy()))
}

/// Current level of the global logger.
///
/// Falls back to the configured default when called re-entrantly.
pub fn level() -> LogLevel {
    with_logger(|logger| logger.level()).unwrap_or_else(|| LoggerConfig::default().default_level)
}

/// # Errors
///
/// Returns [`LogError::Busy`] when called re-entrantly.
pub fn register_override<F>(f: F) -> LogResult<()>
where
    F: FnMut(&LogRecord<'_>) + Send + 'static,
{
    with_logger(|logger| logger.register_override(f)).ok_or_else(LogError::busy)
}

pub fn clear_override() -> bool {
    with_logger(Logger::clear_override).unwrap_or(false)
}

/// # Errors
///
/// See [`MechanismRegistry::set_current`](crate::MechanismRegistry::set_current).
pub fn set_mechanism(name: &str) -> LogResult<()> {
    with_logger(|logger| logger.set_mechanism(name)).unwrap_or_else(|| Err(LogError::busy()))
}

/// # Errors
///
/// Returns [`LogError::Busy`] when called re-entrantly.
pub fn clear_mechanism() -> LogResult<()> {
    with_logger(Logger::clear_mechanism).ok_or_else(LogError::busy)
}

pub fn current_mechanism() -> Option<String> {
    with_logger(|logger| logger.current_mechanism().map(str::to_string)).flatten()
}

pub fn mechanism_names() -> Vec<String> {
    with_logger(|logger| logger.mechanism_names()).unwrap_or_default()
}

/// # Errors
///
/// See [`MechanismRegistry::register_custom`](crate::MechanismRegistry::register_custom).
pub fn register_custom_mechanism(mechanism: Box<dyn Mechanism>) -> LogResult<()> {
    with_logger(|logger| logger.register_custom_mechanism(mechanism))
        .unwrap_or_else(|| Err(LogError::busy()))
}

/// # Errors
///
/// Returns [`LogError::MechanismInUse`] if the custom mechanism is current.
pub fn unregister_custom_mechanism() -> LogResult<Option<Box<dyn Mechanism>>> {
    with_logger(Logger::unregister_custom_mechanism).unwrap_or_else(|| Err(LogError::busy()))
}

/// Print every known mechanism name to standard output.
pub fn print_mechanism_names() {
    with_logger(|logger| logger.registry().print_mechanism_names());
}
