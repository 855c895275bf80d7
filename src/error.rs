//! Error types for switchlog operations.
//!
//! The logging facility cannot safely log errors about itself through the
//! mechanism it is trying to configure. Every error therefore has two
//! outlets:
//!
//! - a structured `tracing` event, emitted when the error is constructed
//!   (inert unless the host installs a subscriber), and
//! - [`LogError::report()`], a direct write to standard error used by the
//!   façade whenever it swallows a failure.
//!
//! No error is ever fatal. The façade degrades to dropping the message.
//!
//! # Example
//!
//! ```rust
//! use switchlog::{LogError, LogLevel};
//!
//! let err = LogLevel::from_raw(42).unwrap_err();
//! assert!(matches!(err, LogError::InvalidLevel { level: 42 }));
//! assert_eq!(err.severity(), LogLevel::Error);
//! ```

use crate::level::LogLevel;
use crate::logging::{log_error, log_warn};
use std::io::Write;
use thiserror::Error;

/// High-level categorization of errors for routing decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The caller passed something that does not resolve or is out of range.
    Client,

    /// An output backend failed (socket unavailable, init refused).
    External,

    /// The facility itself could not complete the request (rendering).
    Internal,
}

/// Convenient result type for switchlog operations.
pub type LogResult<T> = std::result::Result<T, LogError>;

/// Errors that can occur while configuring or using the logging facility.
///
/// | Variant | Category |
/// |---------|----------|
/// | `InvalidLevel` | Client |
/// | `UnknownLevelName` | Client |
/// | `UnknownMechanism` | Client |
/// | `InitFailed` | External |
/// | `FormatFailed` | Internal |
/// | `NullInput` | Client |
/// | `InvalidMechanismName` | Client |
/// | `MechanismInUse` | Client |
/// | `ConfigurationError` | Client |
/// | `Busy` | Internal |
#[derive(Error, Debug)]
pub enum LogError {
    /// A raw level value lies outside the operational range.
    #[error("Invalid loglevel: {level}")]
    InvalidLevel {
        /// The rejected raw value.
        level: i32,
    },

    /// A level name matches none of the canonical names.
    #[error("invalid loglevel name: \"{name}\"")]
    UnknownLevelName {
        /// The rejected name.
        name: String,
    },

    /// A mechanism name matches no known descriptor.
    #[error("Unknown logging mechanism: \"{name}\"")]
    UnknownMechanism {
        /// The rejected name.
        name: String,
    },

    /// A mechanism's `init` reported failure.
    #[error("Failed to initialize mechanism \"{mechanism}\": {message}")]
    InitFailed {
        /// Name of the mechanism that refused to start.
        mechanism: String,
        /// What went wrong.
        message: String,
        /// The underlying I/O failure, if any.
        #[source]
        source: Option<std::io::Error>,
    },

    /// Rendering a message overflowed the buffer or the formatter failed.
    #[error("Failed to render log message: {message}")]
    FormatFailed {
        /// What went wrong.
        message: String,
    },

    /// A required string argument was absent or empty.
    #[error("No {argument} provided")]
    NullInput {
        /// Which argument was missing.
        argument: &'static str,
    },

    /// A custom mechanism name is unusable as a lookup key.
    #[error("Invalid mechanism name \"{name}\": {reason}")]
    InvalidMechanismName {
        /// The rejected name.
        name: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The custom slot holds the current mechanism and cannot be replaced.
    #[error("Custom mechanism \"{name}\" is current and cannot be replaced")]
    MechanismInUse {
        /// Name of the mechanism occupying the slot.
        name: String,
    },

    /// Logger configuration is invalid.
    #[error("Logger configuration error: {message}")]
    ConfigurationError {
        /// Description of the configuration problem.
        message: String,
    },

    /// The global logger was called again from inside one of its own
    /// operations on the same thread.
    #[error("Global logger is already in use on this thread")]
    Busy,
}

impl LogError {
    /// Get the error category for routing decisions.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidLevel { .. } => ErrorCategory::Client,
            Self::UnknownLevelName { .. } => ErrorCategory::Client,
            Self::UnknownMechanism { .. } => ErrorCategory::Client,
            Self::InitFailed { .. } => ErrorCategory::External,
            Self::FormatFailed { .. } => ErrorCategory::Internal,
            Self::NullInput { .. } => ErrorCategory::Client,
            Self::InvalidMechanismName { .. } => ErrorCategory::Client,
            Self::MechanismInUse { .. } => ErrorCategory::Client,
            Self::ConfigurationError { .. } => ErrorCategory::Client,
            Self::Busy => ErrorCategory::Internal,
        }
    }

    /// Level this error is reported at on the side channel.
    ///
    /// Truncated or unrenderable messages are warnings: the caller still gets
    /// something (or nothing) logged and the process carries on. Everything
    /// else is an error.
    pub fn severity(&self) -> LogLevel {
        match self {
            Self::FormatFailed { .. } => LogLevel::Warning,
            _ => LogLevel::Error,
        }
    }

    /// Write this error straight to standard error.
    ///
    /// This is the facility's lowest-effort channel and never goes through a
    /// mechanism. Write failures are ignored.
    pub fn report(&self) {
        let stderr = std::io::stderr();
        let mut out = stderr.lock();
        let _ = writeln!(out, "{}: {}", self.severity(), self);
    }

    // =========================================================================
    // Constructor methods with automatic logging
    // =========================================================================

    /// Create an invalid level error (logs at ERROR level).
    pub fn invalid_level(level: i32) -> Self {
        log_error!(
            error_type = "invalid_level",
            level = level,
            "Loglevel outside operational range"
        );
        Self::InvalidLevel { level }
    }

    pub fn unknown_level_name(name: impl Into<String>) -> Self {
        let name = name.into();
        log_error!(
            error_type = "unknown_level_name",
            name = %name,
            "Loglevel name does not resolve"
        );
        Self::UnknownLevelName { name }
    }

    pub fn unknown_mechanism(name: impl Into<String>) -> Self {
        let name = name.into();
        log_error!(
            error_type = "unknown_mechanism",
            name = %name,
            "Logging mechanism does not resolve"
        );
        Self::UnknownMechanism { name }
    }

    pub fn init_failed(
        mechanism: impl Into<String>,
        message: impl Into<String>,
        source: Option<std::io::Error>,
    ) -> Self {
        let mechanism = mechanism.into();
        let message = message.into();
        log_error!(
            error_type = "init_failed",
            mechanism = %mechanism,
            message = %message,
            has_source = source.is_some(),
            "Logging mechanism failed to initialize"
        );
        Self::InitFailed {
            mechanism,
            message,
            source,
        }
    }

    pub fn format_failed(message: impl Into<String>) -> Self {
        let message = message.into();
        log_warn!(
            error_type = "format_failed",
            message = %message,
            "Log message rendering failed"
        );
        Self::FormatFailed { message }
    }

    pub fn null_input(argument: &'static str) -> Self {
        log_error!(
            error_type = "null_input",
            argument = argument,
            "Required argument missing"
        );
        Self::NullInput { argument }
    }

    pub fn invalid_mechanism_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        let name = name.into();
        let reason = reason.into();
        log_error!(
            error_type = "invalid_mechanism_name",
            name = %name,
            reason = %reason,
            "Custom mechanism name rejected"
        );
        Self::InvalidMechanismName { name, reason }
    }

    pub fn mechanism_in_use(name: impl Into<String>) -> Self {
        let name = name.into();
        log_warn!(
            error_type = "mechanism_in_use",
            name = %name,
            "Custom mechanism slot is busy"
        );
        Self::MechanismInUse { name }
    }

    pub fn configuration_error(message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_type = "configuration_error",
            message = %message,
            "Logger configuration validation failed"
        );
        Self::ConfigurationError { message }
    }

    pub fn busy() -> Self {
        log_warn!(error_type = "busy", "Re-entrant call into the global logger");
        Self::Busy
    }
}
