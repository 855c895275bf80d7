//! Custom mechanism example - plug your own output into the registry.
//!
//! This example demonstrates:
//! - Implementing the `Mechanism` trait with `init`, `log` and `deinit`
//! - Registering it in the custom slot and selecting it by name
//! - The rules protecting the custom slot while it is in use
//!
//! # Running
//!
//! ```bash
//! cargo run --example custom_mechanism
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use switchlog::{global, LogError, LogLevel, LogResult, Mechanism};

/// Appends every message to a file, one per line.
struct FileMechanism {
    path: PathBuf,
    out: Option<BufWriter<File>>,
}

impl FileMechanism {
    fn new(path: PathBuf) -> Self {
        Self { path, out: None }
    }
}

impl Mechanism for FileMechanism {
    fn name(&self) -> &str {
        "file"
    }

    fn init(&mut self) -> LogResult<()> {
        let file = File::create(&self.path).map_err(|e| {
            LogError::init_failed("file", format!("cannot create {}", self.path.display()), Some(e))
        })?;
        self.out = Some(BufWriter::new(file));
        Ok(())
    }

    fn log(&mut self, level: LogLevel, text: &str) {
        if let Some(out) = self.out.as_mut() {
            let _ = writeln!(out, "[{level:>9}] {text}");
        }
    }

    fn deinit(&mut self) {
        if let Some(mut out) = self.out.take() {
            let _ = out.flush();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let path = std::env::temp_dir().join("switchlog-custom-mechanism.log");

    global::register_custom_mechanism(Box::new(FileMechanism::new(path.clone())))?;
    println!("Mechanisms: {:?}", global::mechanism_names());

    global::set_mechanism("file")?;
    switchlog::notice!("Written to {}", path.display());
    switchlog::warning!("Custom mechanisms see the prefixed text");

    // The slot cannot be replaced while its mechanism is current
    let replacement = FileMechanism::new(path.with_extension("other"));
    if let Err(e) = global::register_custom_mechanism(Box::new(replacement)) {
        println!("Rejected: {e}");
    }

    // Switching away runs deinit, which flushes the file
    global::set_mechanism("null")?;
    global::unregister_custom_mechanism()?;

    print!("{}", std::fs::read_to_string(&path)?);
    Ok(())
}
