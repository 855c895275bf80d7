use crate::error::{LogError, LogResult};
use crate::level::LogLevel;
use crate::logging::log_debug;
use crate::mechanism::{SyslogConfig, LIST_COMMAND, STDERR_MECHANISM};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment key holding the active level name
pub const LEVEL_ENV_KEY: &str = "SWITCHLOG_LEVEL";

/// Environment key holding the active mechanism name
pub const MECHANISM_ENV_KEY: &str = "SWITCHLOG_MECHANISM";

/// Maximum rendered message size in bytes
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 4096;

/// Configuration of one [`Logger`](crate::Logger)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Level used until `set_level` is called, when the environment holds none
    pub default_level: LogLevel,

    /// Mechanism selected when the environment names none
    pub default_mechanism: String,

    /// Environment key mirroring the active level
    pub level_env_key: String,

    /// Environment key mirroring the active mechanism
    pub mechanism_env_key: String,

    /// Rendered messages longer than this are truncated
    pub max_message_size: usize,

    pub syslog: SyslogConfig,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            default_level: LogLevel::Info,
            default_mechanism: STDERR_MECHANISM.to_string(),
            level_env_key: LEVEL_ENV_KEY.to_string(),
            mechanism_env_key: MECHANISM_ENV_KEY.to_string(),
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
            syslog: SyslogConfig::default(),
        }
    }
}

impl LoggerConfig {
    /// Validate the configuration is usable
    ///
    /// # Errors
    ///
    /// Returns [`LogError::ConfigurationError`] if:
    /// - An environment key is empty or contains `=` or NUL
    /// - The default mechanism is empty or the `list` pseudo-command
    /// - The maximum message size is zero
    pub fn validate(&self) -> LogResult<()> {
        Self::validate_env_key("level_env_key", &self.level_env_key)?;
        Self::validate_env_key("mechanism_env_key", &self.mechanism_env_key)?;

        if self.level_env_key == self.mechanism_env_key {
            return Err(LogError::configuration_error(
                "level and mechanism environment keys must differ",
            ));
        }
        if self.default_mechanism.is_empty() || self.default_mechanism == LIST_COMMAND {
            return Err(LogError::configuration_error(format!(
                "default mechanism must name a mechanism, got \"{}\"",
                self.default_mechanism
            )));
        }
        if self.max_message_size == 0 {
            return Err(LogError::configuration_error(
                "max_message_size must be greater than zero",
            ));
        }
        Ok(())
    }

    fn validate_env_key(field: &str, key: &str) -> LogResult<()> {
        if key.is_empty() || key.contains('=') || key.contains('\0') {
            return Err(LogError::configuration_error(format!(
                "{field} is not a usable environment key: \"{key}\""
            )));
        }
        Ok(())
    }

    /// Parse configuration from JSON; missing fields take their defaults
    ///
    /// # Errors
    ///
    /// Returns [`LogError::ConfigurationError`] if the JSON is malformed or
    /// the parsed configuration fails [`validate`](Self::validate).
    pub fn from_json(json: &str) -> LogResult<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| {
            LogError::configuration_error(format!("Invalid logger configuration JSON: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration overrides from environment variables
    ///
    /// Reads `SWITCHLOG_MAX_MESSAGE_SIZE`, `SWITCHLOG_SYSLOG_IDENT` and
    /// `SWITCHLOG_SYSLOG_SOCKET`. The level and mechanism selections are not
    /// read here; they are consulted on every log call.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::ConfigurationError`] if
    /// `SWITCHLOG_MAX_MESSAGE_SIZE` is not a positive integer.
    pub fn from_env() -> LogResult<Self> {
        let mut config = Self::default();

        if let Ok(size) = std::env::var("SWITCHLOG_MAX_MESSAGE_SIZE") {
            config.max_message_size = size.parse().map_err(|_| {
                LogError::configuration_error(format!(
                    "SWITCHLOG_MAX_MESSAGE_SIZE is not a number: \"{size}\""
                ))
            })?;
        }
        if let Ok(ident) = std::env::var("SWITCHLOG_SYSLOG_IDENT") {
            config.syslog.ident = Some(ident);
        }
        if let Ok(socket) = std::env::var("SWITCHLOG_SYSLOG_SOCKET") {
            config.syslog.socket_path = Some(PathBuf::from(socket));
        }

        config.validate()?;

        log_debug!(
            default_level = %config.default_level,
            default_mechanism = %config.default_mechanism,
            max_message_size = config.max_message_size,
            "Logger configuration loaded from environment"
        );

        Ok(config)
    }
}
