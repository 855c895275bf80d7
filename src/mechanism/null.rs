use super::{Mechanism, NULL_MECHANISM};

/// Discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullMechanism;

impl Mechanism for NullMechanism {
    fn name(&self) -> &str {
        NULL_MECHANISM
    }
}
