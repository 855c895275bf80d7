//! Test helper utilities for switchlog integration tests
//!
//! Every integration test drives the one process-wide logger, so each test
//! starts from [`reset_global_logger`] and runs under `#[serial]`.
//!
//! IMPORTANT: These helpers are test-only and should NEVER be used in production code.

// Allow dead code in test utilities - functions are used across different test files
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use switchlog::config::{LEVEL_ENV_KEY, MECHANISM_ENV_KEY};
use switchlog::{LogLevel, LogRecord, LoggerConfig, Mechanism};

/// One message as seen by a capturing override function
#[derive(Debug, Clone, PartialEq)]
pub struct Captured {
    pub level: LogLevel,
    pub file: String,
    pub func: String,
    pub line: u32,
    pub message: String,
}

impl From<&LogRecord<'_>> for Captured {
    fn from(record: &LogRecord<'_>) -> Self {
        Self {
            level: record.level,
            file: record.file.to_string(),
            func: record.func.to_string(),
            line: record.line,
            message: record.message.to_string(),
        }
    }
}

/// Forget every selection and start over with a default global logger.
pub fn reset_global_logger() {
    std::env::remove_var(LEVEL_ENV_KEY);
    std::env::remove_var(MECHANISM_ENV_KEY);
    switchlog::global::init(LoggerConfig::default()).expect("default config is valid");
}

/// Register an override on the global logger that records every message.
pub fn capture_override() -> Arc<Mutex<Vec<Captured>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    switchlog::global::register_override(move |record| {
        sink.lock().unwrap().push(Captured::from(record));
    })
    .expect("not called from inside the logger");
    seen
}

/// Custom mechanism collecting the text it is handed.
pub struct CollectingMechanism {
    name: String,
    lines: Arc<Mutex<Vec<String>>>,
}

impl CollectingMechanism {
    pub fn new(name: &str) -> (Box<Self>, Arc<Mutex<Vec<String>>>) {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let mechanism = Box::new(Self {
            name: name.to_string(),
            lines: Arc::clone(&lines),
        });
        (mechanism, lines)
    }
}

impl Mechanism for CollectingMechanism {
    fn name(&self) -> &str {
        &self.name
    }

    fn log(&mut self, _level: LogLevel, text: &str) {
        self.lines.lock().unwrap().push(text.to_string());
    }
}
