//! Syslog mechanism
//!
//! Sends one datagram per message to the local syslog daemon over its Unix
//! socket, in the traditional BSD form `<PRI>ident[pid]: text`.
//! Unix-like platforms only; elsewhere `init` fails.

use super::{Mechanism, SYSLOG_MECHANISM};
use crate::error::{LogError, LogResult};
use crate::level::LogLevel;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[cfg(unix)]
use crate::logging::log_debug;
#[cfg(unix)]
use std::io;
#[cfg(unix)]
use std::os::unix::net::UnixDatagram;

/// Socket paths probed when none is configured, in order.
#[cfg(unix)]
pub const DEFAULT_SOCKET_PATHS: [&str; 3] = ["/dev/log", "/var/run/syslog", "/var/run/log"];

/// Syslog facility codes (RFC 3164).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyslogFacility {
    #[default]
    User = 1,
    Daemon = 3,
    Local0 = 16,
    Local1 = 17,
    Local2 = 18,
    Local3 = 19,
    Local4 = 20,
    Local5 = 21,
    Local6 = 22,
    Local7 = 23,
}

/// Syslog severity codes (RFC 3164).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyslogSeverity {
    Emergency = 0,
    Alert = 1,
    Critical = 2,
    Error = 3,
    Warning = 4,
    Notice = 5,
    Info = 6,
    Debug = 7,
}

impl From<LogLevel> for SyslogSeverity {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::VeryNoisy | LogLevel::Noisy | LogLevel::Debug => Self::Debug,
            LogLevel::Verbose | LogLevel::Info => Self::Info,
            LogLevel::Notice => Self::Notice,
            LogLevel::Warning => Self::Warning,
            LogLevel::Error => Self::Error,
            LogLevel::Quiet => Self::Critical,
        }
    }
}

/// Syslog-specific configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SyslogConfig {
    /// Tag in front of each message; defaults to the executable name
    pub ident: Option<String>,
    /// Daemon socket; defaults to the first of `/dev/log`, `/var/run/syslog`
    /// and `/var/run/log` that accepts
    pub socket_path: Option<PathBuf>,
    pub facility: SyslogFacility,
}

/// Forwards messages to the local syslog daemon.
#[derive(Debug)]
pub struct SyslogMechanism {
    config: SyslogConfig,
    ident: String,
    #[cfg(unix)]
    socket: Option<UnixDatagram>,
}

impl SyslogMechanism {
    pub fn new(config: SyslogConfig) -> Self {
        let ident = config.ident.clone().unwrap_or_else(default_ident);
        Self {
            config,
            ident,
            #[cfg(unix)]
            socket: None,
        }
    }

    /// Priority value for a level: `facility * 8 + severity`
    pub fn priority(&self, level: LogLevel) -> u8 {
        (self.config.facility as u8) * 8 + SyslogSeverity::from(level) as u8
    }

    /// Datagram payload for one message
    pub fn format_message(&self, level: LogLevel, text: &str) -> String {
        format!(
            "<{}>{}[{}]: {}",
            self.priority(level),
            self.ident,
            std::process::id(),
            text
        )
    }

    #[cfg(unix)]
    fn candidate_paths(&self) -> Vec<PathBuf> {
        match &self.config.socket_path {
            Some(path) => vec![path.clone()],
            None => DEFAULT_SOCKET_PATHS.iter().map(PathBuf::from).collect(),
        }
    }
}

impl Default for SyslogMechanism {
    fn default() -> Self {
        Self::new(SyslogConfig::default())
    }
}

fn default_ident() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|path| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "switchlog".to_string())
}

#[cfg(unix)]
impl SyslogMechanism {
    /// Connect to the first candidate socket that accepts.
    fn connect(&self) -> io::Result<UnixDatagram> {
        let mut last_error = None;

        for path in self.candidate_paths() {
            let attempt = UnixDatagram::unbound().and_then(|socket| {
                socket.connect(&path)?;
                Ok(socket)
            });
            match attempt {
                Ok(socket) => {
                    log_debug!(path = %path.display(), "Connected to syslog socket");
                    return Ok(socket);
                }
                Err(e) => last_error = Some(e),
            }
        }

        Err(last_error.unwrap_or_else(|| io::Error::from(io::ErrorKind::NotFound)))
    }
}

#[cfg(unix)]
impl Mechanism for SyslogMechanism {
    fn name(&self) -> &str {
        SYSLOG_MECHANISM
    }

    fn init(&mut self) -> LogResult<()> {
        let socket = self.connect().map_err(|e| {
            LogError::init_failed(
                SYSLOG_MECHANISM,
                "no syslog socket accepted a connection",
                Some(e),
            )
        })?;
        self.socket = Some(socket);
        Ok(())
    }

    fn log(&mut self, level: LogLevel, text: &str) {
        let Some(socket) = &self.socket else {
            return;
        };
        let message = self.format_message(level, text);
        if socket.send(message.as_bytes()).is_ok() {
            return;
        }

        // The daemon recreates its socket on restart; reconnect once and retry.
        match self.connect() {
            Ok(socket) => {
                // Lost datagrams are not reported; there is nowhere left to report them.
                let _ = socket.send(message.as_bytes());
                self.socket = Some(socket);
            }
            Err(e) => log_debug!(error = %e, "Syslog reconnect failed"),
        }
    }

    fn deinit(&mut self) {
        self.socket = None;
    }
}

#[cfg(not(unix))]
impl Mechanism for SyslogMechanism {
    fn name(&self) -> &str {
        SYSLOG_MECHANISM
    }

    fn init(&mut self) -> LogResult<()> {
        Err(LogError::init_failed(
            SYSLOG_MECHANISM,
            "syslog is only available on unix platforms",
            None,
        ))
    }
}
