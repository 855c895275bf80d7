//! Logging façade
//!
//! [`Logger`] owns every piece of state the facility needs: the active level,
//! the optional override function, the mechanism registry and the
//! environment store the selections are mirrored into.
//!
//! A log call runs through these steps:
//!
//! 1. Drop the message if the current level is quieter than the message level.
//! 2. Render the arguments, truncated to `max_message_size` bytes.
//! 3. Prefix it: the detailed form `file:line func() level: message` when the
//!    current level is debug or noisier, otherwise `level: message` for
//!    warning and above and the bare message below that.
//! 4. Hand the unprefixed message and its metadata to the override function
//!    if one is registered, or
//! 5. dispatch the prefixed text through the mechanism registry.

use crate::config::LoggerConfig;
use crate::env::{EnvStore, ProcessEnv};
use crate::error::{LogError, LogResult};
use crate::level::LogLevel;
use crate::logging::log_debug;
use crate::mechanism::Mechanism;
use crate::registry::MechanismRegistry;
use std::fmt::{self, Write as _};

/// Source position of a log call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub file: &'static str,
    /// Path of the calling function
    pub func: &'static str,
    pub line: u32,
}

impl Location {
    pub const fn new(file: &'static str, func: &'static str, line: u32) -> Self {
        Self { file, func, line }
    }
}

/// Everything an override function receives for one message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogRecord<'a> {
    pub level: LogLevel,
    pub file: &'a str,
    pub func: &'a str,
    pub line: u32,
    /// Rendered message without any prefix
    pub message: &'a str,
}

/// Function receiving every surviving message in place of the mechanisms.
///
/// Whatever context the function needs travels in its captures.
pub type OverrideFn = Box<dyn FnMut(&LogRecord<'_>) + Send>;

/// Explicit handle on one logging facility.
pub struct Logger {
    config: LoggerConfig,
    level: Option<LogLevel>,
    override_fn: Option<OverrideFn>,
    registry: MechanismRegistry,
    env: Box<dyn EnvStore>,
}

impl Logger {
    /// Logger over the real process environment
    pub fn new(config: LoggerConfig) -> Self {
        Self::with_env(config, Box::new(ProcessEnv))
    }

    /// Logger over an explicit environment store
    pub fn with_env(config: LoggerConfig, env: Box<dyn EnvStore>) -> Self {
        let registry = MechanismRegistry::new(&config);
        Self::with_registry(config, registry, env)
    }

    /// Logger over explicit parts
    pub fn with_registry(
        config: LoggerConfig,
        registry: MechanismRegistry,
        env: Box<dyn EnvStore>,
    ) -> Self {
        log_debug!(
            default_level = %config.default_level,
            default_mechanism = %config.default_mechanism,
            "Logger created"
        );

        Self {
            config,
            level: None,
            override_fn: None,
            registry,
            env,
        }
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    pub fn env(&self) -> &dyn EnvStore {
        self.env.as_ref()
    }

    pub fn env_mut(&mut self) -> &mut dyn EnvStore {
        self.env.as_mut()
    }

    pub fn registry(&self) -> &MechanismRegistry {
        &self.registry
    }

    /// Set the process-wide level and mirror it into the environment store.
    pub fn set_level(&mut self, level: LogLevel) {
        self.level = Some(level);
        self.env.set(&self.config.level_env_key, level.name());
    }

    /// [`set_level`](Self::set_level) for a raw level value.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::InvalidLevel`] if `level` is outside the
    /// operational range; the stored level is left untouched.
    pub fn set_level_raw(&mut self, level: i32) -> LogResult<()> {
        let level = LogLevel::from_raw(level)?;
        self.set_level(level);
        Ok(())
    }

    /// Current level.
    ///
    /// A valid level name in the environment store always wins; otherwise the
    /// last level set, or the configured default.
    pub fn level(&self) -> LogLevel {
        let stored = self.level.unwrap_or(self.config.default_level);
        match self.env.get(&self.config.level_env_key) {
            Some(name) => LogLevel::from_name(&name).unwrap_or(stored),
            None => stored,
        }
    }

    /// Route every surviving message to `f` instead of the mechanisms.
    ///
    /// Replaces any previously registered function.
    pub fn register_override<F>(&mut self, f: F)
    where
        F: FnMut(&LogRecord<'_>) + Send + 'static,
    {
        self.override_fn = Some(Box::new(f));
    }

    /// Remove the override function; returns whether one was registered.
    pub fn clear_override(&mut self) -> bool {
        self.override_fn.take().is_some()
    }

    pub fn has_override(&self) -> bool {
        self.override_fn.is_some()
    }

    /// Make `name` the current mechanism.
    ///
    /// See [`MechanismRegistry::set_current`].
    pub fn set_mechanism(&mut self, name: &str) -> LogResult<()> {
        self.registry.set_current(name, self.env.as_mut())
    }

    /// Tear down the current mechanism and forget the selection.
    pub fn clear_mechanism(&mut self) {
        self.registry.clear(self.env.as_mut());
    }

    pub fn current_mechanism(&self) -> Option<&str> {
        self.registry.current_name()
    }

    pub fn mechanism_names(&self) -> Vec<String> {
        self.registry.mechanism_names()
    }

    /// Install a caller-supplied mechanism in the custom slot.
    ///
    /// See [`MechanismRegistry::register_custom`].
    pub fn register_custom_mechanism(&mut self, mechanism: Box<dyn Mechanism>) -> LogResult<()> {
        self.registry.register_custom(mechanism)
    }

    /// Empty the custom slot.
    pub fn unregister_custom_mechanism(&mut self) -> LogResult<Option<Box<dyn Mechanism>>> {
        self.registry.unregister_custom()
    }

    /// Filter, render and route one message.
    ///
    /// Never fails: rendering problems are reported on standard error.
    pub fn log(&mut self, level: LogLevel, location: Location, args: fmt::Arguments<'_>) {
        let current = self.level();
        if !current.is_noisier_than(level) {
            return;
        }

        let Some(message) = self.render(args) else {
            return;
        };

        if let Some(override_fn) = self.override_fn.as_mut() {
            override_fn(&LogRecord {
                level,
                file: location.file,
                func: location.func,
                line: location.line,
                message: &message,
            });
            return;
        }

        let text = if current.is_noisier_than(LogLevel::Debug) {
            format!(
                "{}:{} {}() {}: {}",
                location.file, location.line, location.func, level, message
            )
        } else if level < LogLevel::Warning {
            message
        } else {
            format!("{level}: {message}")
        };

        self.registry.dispatch(level, &text, self.env.as_mut());
    }

    fn render(&self, args: fmt::Arguments<'_>) -> Option<String> {
        let max = self.config.max_message_size;
        let mut buffer = BoundedBuffer::new(max);
        let result = buffer.write_fmt(args);

        if buffer.truncated {
            LogError::format_failed(format!("message truncated to {max} bytes")).report();
        } else if result.is_err() {
            LogError::format_failed("formatter returned an error").report();
            return None;
        }

        Some(buffer.text)
    }
}

/// Render target that refuses to grow past `max` bytes.
///
/// The first write that does not fit is cut at a character boundary and
/// fails, which stops the formatter.
struct BoundedBuffer {
    text: String,
    max: usize,
    truncated: bool,
}

impl BoundedBuffer {
    fn new(max: usize) -> Self {
        Self {
            text: String::new(),
            max,
            truncated: false,
        }
    }
}

impl fmt::Write for BoundedBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.truncated {
            return Err(fmt::Error);
        }

        let room = self.max - self.text.len();
        if s.len() <= room {
            self.text.push_str(s);
            return Ok(());
        }

        let mut end = room;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        self.text.push_str(&s[..end]);
        self.truncated = true;
        Err(fmt::Error)
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("config", &self.config)
            .field("level", &self.level)
            .field("has_override", &self.override_fn.is_some())
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
