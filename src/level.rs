//! Loglevel model
//!
//! Levels form a contiguous, totally ordered scale from the noisiest
//! ([`LogLevel::VeryNoisy`]) to the quietest ([`LogLevel::Quiet`]). Raw values
//! sit strictly between two sentinels, [`LogLevel::NOISY_BOUND`] and
//! [`LogLevel::QUIET_BOUND`], which are never valid runtime levels.
//!
//! Every name conversion goes through the single [`LEVELS`] table.

use crate::error::{LogError, LogResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

/// Severity of a log message, noisiest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
#[repr(i32)]
pub enum LogLevel {
    /// Very very noisy output, not for bug reports
    VeryNoisy = 1,
    /// Jabberish or often repeating notifications
    Noisy = 2,
    /// Internal working notifications
    Debug = 3,
    /// Rough internal working
    Verbose = 4,
    /// Informative to the user but not vital
    Info = 5,
    /// Something the user should read
    Notice = 6,
    /// Warnings and errors only
    Warning = 7,
    /// Important errors only
    Error = 8,
    /// Nothing is printed
    Quiet = 9,
}

/// Canonical lowercase names, indexed by `level as i32 - 1`.
const LEVELS: [(LogLevel, &str); 9] = [
    (LogLevel::VeryNoisy, "verynoisy"),
    (LogLevel::Noisy, "noisy"),
    (LogLevel::Debug, "debug"),
    (LogLevel::Verbose, "verbose"),
    (LogLevel::Info, "info"),
    (LogLevel::Notice, "notice"),
    (LogLevel::Warning, "warning"),
    (LogLevel::Error, "error"),
    (LogLevel::Quiet, "quiet"),
];

// The table must stay in lockstep with the enum discriminants.
const _: () = {
    let mut i = 0;
    while i < LEVELS.len() {
        assert!(LEVELS[i].0 as i32 == i as i32 + 1);
        i += 1;
    }
    assert!(LogLevel::NOISY_BOUND + 1 == LogLevel::VeryNoisy as i32);
    assert!(LogLevel::QUIET_BOUND - 1 == LogLevel::Quiet as i32);
};

impl LogLevel {
    /// Invalid sentinel just below the noisiest level.
    pub const NOISY_BOUND: i32 = 0;

    /// Invalid sentinel just above the quietest level.
    pub const QUIET_BOUND: i32 = 10;

    /// Convert a raw level value, rejecting the sentinels and anything beyond.
    pub fn from_raw(raw: i32) -> LogResult<Self> {
        if raw <= Self::NOISY_BOUND || raw >= Self::QUIET_BOUND {
            return Err(LogError::invalid_level(raw));
        }
        Ok(LEVELS[(raw - 1) as usize].0)
    }

    pub fn as_raw(self) -> i32 {
        self as i32
    }

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        LEVELS[(self as i32 - 1) as usize].1
    }

    /// Resolve a canonical name. Comparison is exact and case-sensitive.
    pub fn from_name(name: &str) -> LogResult<Self> {
        if name.is_empty() {
            return Err(LogError::invalid_level(Self::NOISY_BOUND));
        }
        LEVELS
            .iter()
            .find(|(_, candidate)| *candidate == name)
            .map(|(level, _)| *level)
            .ok_or_else(|| LogError::unknown_level_name(name))
    }

    /// True if `self` is at or before `other` on the noisy-to-quiet scale.
    ///
    /// Equal levels count as noisier.
    pub fn is_noisier_than(self, other: LogLevel) -> bool {
        self <= other
    }

    /// All operational levels, noisiest first.
    pub fn all() -> impl DoubleEndedIterator<Item = LogLevel> + ExactSizeIterator {
        LEVELS.iter().map(|(level, _)| *level)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for LogLevel {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl TryFrom<i32> for LogLevel {
    type Error = LogError;

    fn try_from(raw: i32) -> Result<Self, LogError> {
        Self::from_raw(raw)
    }
}

impl TryFrom<String> for LogLevel {
    type Error = LogError;

    fn try_from(name: String) -> Result<Self, LogError> {
        Self::from_name(&name)
    }
}

impl From<LogLevel> for &'static str {
    fn from(level: LogLevel) -> Self {
        level.name()
    }
}

impl From<LogLevel> for i32 {
    fn from(level: LogLevel) -> Self {
        level.as_raw()
    }
}

/// Name of a raw level value.
pub fn level_to_name(level: i32) -> LogResult<&'static str> {
    LogLevel::from_raw(level).map(LogLevel::name)
}

/// Level for a canonical name.
pub fn name_to_level(name: &str) -> LogResult<LogLevel> {
    LogLevel::from_name(name)
}

/// Raw-value form of [`LogLevel::is_noisier_than`].
///
/// Out-of-range arguments are reported on standard error and yield `false`.
pub fn is_noisier_than(a: i32, b: i32) -> bool {
    match (LogLevel::from_raw(a), LogLevel::from_raw(b)) {
        (Ok(a), Ok(b)) => a.is_noisier_than(b),
        (Err(err), _) | (_, Err(err)) => {
            err.report();
            false
        }
    }
}

/// Level names from noisiest to quietest, sentinels excluded.
pub fn level_names() -> impl DoubleEndedIterator<Item = &'static str> + ExactSizeIterator {
    LEVELS.iter().map(|(_, name)| *name)
}

/// Write every level name on one line, separated by spaces.
pub fn write_level_names<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
    for name in level_names() {
        write!(out, "{name} ")?;
    }
    writeln!(out)
}

/// Print every level name to standard output.
pub fn print_level_names() {
    let stdout = io::stdout();
    let _ = write_level_names(&mut stdout.lock());
}
