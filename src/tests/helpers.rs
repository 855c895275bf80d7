// Test helper utilities
//
// Reusable fixtures for the unit tests: a capturing writer, a mechanism that
// records every lifecycle call, and loggers wired to both.
//
// IMPORTANT: These helpers are test-only and should NEVER be used in production code.

use crate::config::LoggerConfig;
use crate::env::MemoryEnv;
use crate::error::{LogError, LogResult};
use crate::level::LogLevel;
use crate::logger::Logger;
use crate::mechanism::{Mechanism, StderrMechanism, SyslogMechanism};
use crate::registry::MechanismRegistry;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Cloneable in-memory writer; every clone appends to the same buffer.
#[derive(Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock().unwrap()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Lifecycle calls observed by a [`RecordingMechanism`].
#[derive(Debug, Default)]
pub struct CallLog {
    pub init: usize,
    pub deinit: usize,
    pub messages: Vec<(LogLevel, String)>,
}

/// Custom mechanism that records every call into a shared [`CallLog`].
pub struct RecordingMechanism {
    name: String,
    fail_init: bool,
    calls: Arc<Mutex<CallLog>>,
}

impl RecordingMechanism {
    pub fn new(name: &str) -> (Self, Arc<Mutex<CallLog>>) {
        let calls = Arc::new(Mutex::new(CallLog::default()));
        let mechanism = Self {
            name: name.to_string(),
            fail_init: false,
            calls: Arc::clone(&calls),
        };
        (mechanism, calls)
    }

    /// Variant whose `init` always reports failure
    pub fn failing(name: &str) -> (Self, Arc<Mutex<CallLog>>) {
        let (mut mechanism, calls) = Self::new(name);
        mechanism.fail_init = true;
        (mechanism, calls)
    }
}

impl Mechanism for RecordingMechanism {
    fn name(&self) -> &str {
        &self.name
    }

    fn init(&mut self) -> LogResult<()> {
        self.calls.lock().unwrap().init += 1;
        if self.fail_init {
            return Err(LogError::init_failed(&self.name, "refused by test", None));
        }
        Ok(())
    }

    fn log(&mut self, level: LogLevel, text: &str) {
        self.calls
            .lock()
            .unwrap()
            .messages
            .push((level, text.to_string()));
    }

    fn deinit(&mut self) {
        self.calls.lock().unwrap().deinit += 1;
    }
}

/// Registry whose stderr mechanism and `list` output are captured.
pub fn capturing_registry(config: &LoggerConfig) -> (MechanismRegistry, SharedBuffer, SharedBuffer) {
    let stderr = SharedBuffer::new();
    let listing = SharedBuffer::new();
    let registry = MechanismRegistry::with_builtins(
        config,
        StderrMechanism::with_writer(Box::new(stderr.clone())),
        SyslogMechanism::new(config.syslog.clone()),
    )
    .with_listing_output(Box::new(listing.clone()));
    (registry, stderr, listing)
}

/// Logger over `env` whose stderr mechanism writes into the returned buffer.
pub fn capturing_logger(env: MemoryEnv) -> (Logger, SharedBuffer) {
    let config = LoggerConfig::default();
    let (registry, stderr, _listing) = capturing_registry(&config);
    (Logger::with_registry(config, registry, Box::new(env)), stderr)
}
