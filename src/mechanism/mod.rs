//! Output mechanisms
//!
//! A mechanism is a named output backend with optional `init`, `log` and
//! `deinit` operations. The built-ins form a closed set of variants
//! (`null`, `stderr`, `syslog`); callers can add one more through the custom
//! slot by implementing [`Mechanism`].
//!
//! ## Organization
//! - `null` - discards everything
//! - `stderr` - writes lines to standard error
//! - `syslog` - forwards to the local syslog daemon

mod null;
mod stderr;
mod syslog;

pub use null::NullMechanism;
pub use stderr::StderrMechanism;
pub use syslog::{SyslogConfig, SyslogFacility, SyslogMechanism, SyslogSeverity};

use crate::error::LogResult;
use crate::level::LogLevel;

pub const NULL_MECHANISM: &str = "null";
pub const STDERR_MECHANISM: &str = "stderr";
pub const SYSLOG_MECHANISM: &str = "syslog";

/// Pseudo mechanism name that prints the mechanism list and selects the default
pub const LIST_COMMAND: &str = "list";

/// Longest accepted custom mechanism name, in bytes
pub const MAX_MECHANISM_NAME_LEN: usize = 63;

/// Capability interface of an output backend.
///
/// Only [`name`](Mechanism::name) is required. `log` receives fully
/// rendered text and must swallow its own errors.
pub trait Mechanism: Send {
    /// Unique name, used as lookup key and environment value
    fn name(&self) -> &str;

    /// Prepare the backend; called when it becomes current
    fn init(&mut self) -> LogResult<()> {
        Ok(())
    }

    fn log(&mut self, _level: LogLevel, _text: &str) {}

    /// Release the backend; called when it stops being current
    fn deinit(&mut self) {}
}

/// Internal backend enum for [`Descriptor`]
enum Backend {
    Null(NullMechanism),
    Stderr(StderrMechanism),
    Syslog(SyslogMechanism),
    Custom(Box<dyn Mechanism>),
}

/// A mechanism plus its runtime `initialized` flag.
pub struct Descriptor {
    backend: Backend,
    initialized: bool,
}

impl Descriptor {
    fn from_backend(backend: Backend) -> Self {
        Self {
            backend,
            initialized: false,
        }
    }

    pub fn null(mechanism: NullMechanism) -> Self {
        Self::from_backend(Backend::Null(mechanism))
    }

    pub fn stderr(mechanism: StderrMechanism) -> Self {
        Self::from_backend(Backend::Stderr(mechanism))
    }

    pub fn syslog(mechanism: SyslogMechanism) -> Self {
        Self::from_backend(Backend::Syslog(mechanism))
    }

    pub fn custom(mechanism: Box<dyn Mechanism>) -> Self {
        Self::from_backend(Backend::Custom(mechanism))
    }

    pub fn name(&self) -> &str {
        match &self.backend {
            Backend::Null(m) => m.name(),
            Backend::Stderr(m) => m.name(),
            Backend::Syslog(m) => m.name(),
            Backend::Custom(m) => m.name(),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_custom(&self) -> bool {
        matches!(self.backend, Backend::Custom(_))
    }

    /// Run `init` unless already initialized.
    pub(crate) fn init(&mut self) -> LogResult<()> {
        if self.initialized {
            return Ok(());
        }

        match &mut self.backend {
            Backend::Null(m) => m.init()?,
            Backend::Stderr(m) => m.init()?,
            Backend::Syslog(m) => m.init()?,
            Backend::Custom(m) => m.init()?,
        }

        self.initialized = true;
        Ok(())
    }

    pub(crate) fn log(&mut self, level: LogLevel, text: &str) {
        match &mut self.backend {
            Backend::Null(m) => m.log(level, text),
            Backend::Stderr(m) => m.log(level, text),
            Backend::Syslog(m) => m.log(level, text),
            Backend::Custom(m) => m.log(level, text),
        }
    }

    /// Run `deinit` and clear the `initialized` flag.
    pub(crate) fn deinit(&mut self) {
        if !self.initialized {
            return;
        }

        match &mut self.backend {
            Backend::Null(m) => m.deinit(),
            Backend::Stderr(m) => m.deinit(),
            Backend::Syslog(m) => m.deinit(),
            Backend::Custom(m) => m.deinit(),
        }

        self.initialized = false;
    }

    /// Give back a custom mechanism; built-ins yield `None`.
    pub(crate) fn into_custom(self) -> Option<Box<dyn Mechanism>> {
        match self.backend {
            Backend::Custom(m) => Some(m),
            _ => None,
        }
    }
}

impl std::fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Descriptor")
            .field("name", &self.name())
            .field("initialized", &self.initialized)
            .finish()
    }
}
