//! Mechanism registry
//!
//! Holds the known mechanisms, tracks the single current one and performs
//! switch-over: the old mechanism is deinitialized before the new one is
//! resolved and initialized. `init` always runs before the first `log`.
//!
//! # Degraded state
//!
//! A failed explicit switch ([`MechanismRegistry::set_current`]) leaves the
//! old mechanism torn down and nothing current. Every dispatch is dropped
//! until the next successful `set_current` or [`MechanismRegistry::clear`].
//! There is no automatic fallback.
//!
//! A failed switch attempted by [`MechanismRegistry::dispatch`] itself (the
//! environment names something unusable) only loses that one message; the
//! next dispatch re-reads the environment and tries again.

use crate::config::LoggerConfig;
use crate::env::EnvStore;
use crate::error::{LogError, LogResult};
use crate::level::LogLevel;
use crate::logging::{log_debug, log_warn};
use crate::mechanism::{
    Descriptor, Mechanism, NullMechanism, StderrMechanism, SyslogMechanism, LIST_COMMAND,
    MAX_MECHANISM_NAME_LEN,
};
use std::io::{self, Write};

const LIST_BANNER: &str = "==================================================================";

/// Position of the current descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Builtin(usize),
    Custom,
}

/// Known mechanisms and the current selection.
pub struct MechanismRegistry {
    builtins: Vec<Descriptor>,
    custom: Option<Descriptor>,
    current: Option<Slot>,
    degraded: bool,
    default_mechanism: String,
    env_key: String,
    listing: Box<dyn Write + Send>,
}

impl MechanismRegistry {
    /// Registry with the built-in `null`, `stderr` and `syslog` mechanisms
    pub fn new(config: &LoggerConfig) -> Self {
        Self::with_builtins(
            config,
            StderrMechanism::new(),
            SyslogMechanism::new(config.syslog.clone()),
        )
    }

    /// Registry with explicitly constructed built-ins
    pub fn with_builtins(
        config: &LoggerConfig,
        stderr: StderrMechanism,
        syslog: SyslogMechanism,
    ) -> Self {
        Self {
            builtins: vec![
                Descriptor::null(NullMechanism),
                Descriptor::stderr(stderr),
                Descriptor::syslog(syslog),
            ],
            custom: None,
            current: None,
            degraded: false,
            default_mechanism: config.default_mechanism.clone(),
            env_key: config.mechanism_env_key.clone(),
            listing: Box::new(io::stdout()),
        }
    }

    /// Send the `list` pseudo-command output to `out` instead of standard output
    pub fn with_listing_output(mut self, out: Box<dyn Write + Send>) -> Self {
        self.listing = out;
        self
    }

    /// Every known mechanism name in registration order, custom slot last.
    pub fn mechanism_names(&self) -> Vec<String> {
        self.descriptors().map(|d| d.name().to_string()).collect()
    }

    /// Name of the current mechanism, if any
    pub fn current_name(&self) -> Option<&str> {
        self.current_descriptor().map(Descriptor::name)
    }

    /// Look up a descriptor by name.
    pub fn descriptor(&self, name: &str) -> Option<&Descriptor> {
        self.descriptors().find(|d| d.name() == name)
    }

    /// True after an explicit switch failed and until the next successful one
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Write every mechanism name on one line, separated by spaces.
    pub fn write_mechanism_names<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        for descriptor in self.descriptors() {
            write!(out, "{} ", descriptor.name())?;
        }
        writeln!(out)
    }

    /// Print every mechanism name to standard output.
    pub fn print_mechanism_names(&self) {
        let stdout = io::stdout();
        let _ = self.write_mechanism_names(&mut stdout.lock());
    }

    /// Make `name` the current mechanism.
    ///
    /// `"list"` prints the mechanism list and selects the default instead.
    /// Selecting the current mechanism again is a no-op. On success the
    /// selection is written to the environment store.
    ///
    /// # Errors
    ///
    /// - [`LogError::NullInput`] if `name` is empty
    /// - [`LogError::UnknownMechanism`] if `name` resolves to nothing
    /// - [`LogError::InitFailed`] if the mechanism refuses to start
    ///
    /// After either of the last two the previous mechanism is torn down, no
    /// mechanism is current and the registry is degraded.
    pub fn set_current(&mut self, name: &str, env: &mut dyn EnvStore) -> LogResult<()> {
        match self.switch_to(name, env) {
            Ok(()) => {
                self.degraded = false;
                Ok(())
            }
            Err(e) => {
                if matches!(
                    e,
                    LogError::UnknownMechanism { .. } | LogError::InitFailed { .. }
                ) {
                    self.degraded = true;
                }
                Err(e)
            }
        }
    }

    fn switch_to(&mut self, name: &str, env: &mut dyn EnvStore) -> LogResult<()> {
        if name.is_empty() {
            return Err(LogError::null_input("log mechanism name"));
        }

        let listed = name == LIST_COMMAND;
        let name = if listed {
            self.print_list_banner();
            self.default_mechanism.clone()
        } else {
            name.to_string()
        };

        if self.current_name() == Some(name.as_str()) {
            // The store must stop naming `list`, or every dispatch lists again.
            if listed {
                env.set(&self.env_key, &name);
            }
            return Ok(());
        }

        self.clear_current();

        let slot = self
            .resolve(&name)
            .ok_or_else(|| LogError::unknown_mechanism(&name))?;

        if let Some(descriptor) = self.descriptor_mut(slot) {
            descriptor.init()?;
        }
        self.current = Some(slot);
        env.set(&self.env_key, &name);

        log_debug!(mechanism = %name, "Logging mechanism switched");
        Ok(())
    }

    /// Tear down the current mechanism and forget the selection.
    ///
    /// The next dispatch selects a mechanism from the environment again.
    pub fn clear(&mut self, env: &mut dyn EnvStore) {
        self.clear_current();
        self.degraded = false;
        env.remove(&self.env_key);
    }

    /// Install `mechanism` in the custom slot.
    ///
    /// Replaces any previous custom mechanism unless that one is current.
    ///
    /// # Errors
    ///
    /// - [`LogError::NullInput`] if the name is empty
    /// - [`LogError::InvalidMechanismName`] if the name is too long, is
    ///   `"list"` or belongs to a built-in
    /// - [`LogError::MechanismInUse`] if the slot holds the current mechanism
    pub fn register_custom(&mut self, mechanism: Box<dyn Mechanism>) -> LogResult<()> {
        let name = mechanism.name();
        if name.is_empty() {
            return Err(LogError::null_input("custom mechanism name"));
        }
        if name.len() > MAX_MECHANISM_NAME_LEN {
            return Err(LogError::invalid_mechanism_name(
                name,
                format!("longer than {MAX_MECHANISM_NAME_LEN} bytes"),
            ));
        }
        if name == LIST_COMMAND {
            return Err(LogError::invalid_mechanism_name(
                name,
                "reserved for listing mechanisms",
            ));
        }
        if self.builtins.iter().any(|d| d.name() == name) {
            return Err(LogError::invalid_mechanism_name(
                name,
                "already used by a built-in mechanism",
            ));
        }
        self.ensure_custom_replaceable()?;

        log_debug!(mechanism = %name, "Custom logging mechanism registered");
        self.custom = Some(Descriptor::custom(mechanism));
        Ok(())
    }

    /// Empty the custom slot, returning what it held.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::MechanismInUse`] if the custom mechanism is current.
    pub fn unregister_custom(&mut self) -> LogResult<Option<Box<dyn Mechanism>>> {
        self.ensure_custom_replaceable()?;
        Ok(self.custom.take().and_then(Descriptor::into_custom))
    }

    fn ensure_custom_replaceable(&self) -> LogResult<()> {
        match (&self.custom, self.current) {
            (Some(existing), Some(Slot::Custom)) => {
                Err(LogError::mechanism_in_use(existing.name()))
            }
            _ => Ok(()),
        }
    }

    /// Route `text` to the mechanism named by the environment store.
    ///
    /// Falls back to the default mechanism when the store holds no name.
    /// Switch failures are reported on standard error and the message is
    /// dropped.
    pub fn dispatch(&mut self, level: LogLevel, text: &str, env: &mut dyn EnvStore) {
        if self.degraded {
            return;
        }

        let name = env
            .get(&self.env_key)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| self.default_mechanism.clone());

        if let Err(e) = self.switch_to(&name, env) {
            log_warn!(mechanism = %name, "Dropping message, no usable logging mechanism");
            e.report();
            return;
        }

        if let Some(descriptor) = self.current.and_then(|slot| self.descriptor_mut(slot)) {
            descriptor.log(level, text);
        }
    }

    fn print_list_banner(&mut self) {
        let mut names = Vec::new();
        let _ = self.write_mechanism_names(&mut names);
        let _ = write!(
            self.listing,
            "{LIST_BANNER}\n available logging mechanisms:\n\t{}{LIST_BANNER}\n",
            String::from_utf8_lossy(&names)
        );
        let _ = self.listing.flush();
    }

    fn clear_current(&mut self) {
        if let Some(descriptor) = self.current.take().and_then(|slot| self.descriptor_mut(slot)) {
            descriptor.deinit();
        }
    }

    fn resolve(&self, name: &str) -> Option<Slot> {
        if let Some(index) = self.builtins.iter().position(|d| d.name() == name) {
            return Some(Slot::Builtin(index));
        }
        match &self.custom {
            Some(custom) if custom.name() == name => Some(Slot::Custom),
            _ => None,
        }
    }

    fn descriptors(&self) -> impl Iterator<Item = &Descriptor> {
        self.builtins.iter().chain(self.custom.iter())
    }

    fn current_descriptor(&self) -> Option<&Descriptor> {
        match self.current? {
            Slot::Builtin(index) => self.builtins.get(index),
            Slot::Custom => self.custom.as_ref(),
        }
    }

    fn descriptor_mut(&mut self, slot: Slot) -> Option<&mut Descriptor> {
        match slot {
            Slot::Builtin(index) => self.builtins.get_mut(index),
            Slot::Custom => self.custom.as_mut(),
        }
    }
}

impl Drop for MechanismRegistry {
    fn drop(&mut self) {
        self.clear_current();
    }
}

impl std::fmt::Debug for MechanismRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MechanismRegistry")
            .field("mechanisms", &self.mechanism_names())
            .field("current", &self.current_name())
            .field("degraded", &self.degraded)
            .field("default_mechanism", &self.default_mechanism)
            .finish_non_exhaustive()
    }
}
