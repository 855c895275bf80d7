use super::{Mechanism, STDERR_MECHANISM};
use crate::level::LogLevel;
use std::io::{self, Write};

/// Writes one line per message to standard error.
///
/// Text arrives fully rendered, level prefix included for warning and
/// above, so it is written verbatim. The target is swappable so the output
/// can be captured.
pub struct StderrMechanism {
    target: Box<dyn Write + Send>,
}

impl StderrMechanism {
    pub fn new() -> Self {
        Self {
            target: Box::new(io::stderr()),
        }
    }

    /// Write to `target` instead of the process's standard error
    pub fn with_writer(target: Box<dyn Write + Send>) -> Self {
        Self { target }
    }
}

impl Default for StderrMechanism {
    fn default() -> Self {
        Self::new()
    }
}

impl Mechanism for StderrMechanism {
    fn name(&self) -> &str {
        STDERR_MECHANISM
    }

    fn log(&mut self, _level: LogLevel, text: &str) {
        let _ = writeln!(self.target, "{text}");
        let _ = self.target.flush();
    }

    fn deinit(&mut self) {
        let _ = self.target.flush();
    }
}

impl std::fmt::Debug for StderrMechanism {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StderrMechanism").finish_non_exhaustive()
    }
}
