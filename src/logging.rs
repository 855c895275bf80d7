//! Internal diagnostics for switchlog
//!
//! The facility cannot report on itself through the mechanism it is
//! configuring, so its own debug trail goes through `tracing` instead. These
//! events are inert until the host application installs a subscriber.

// Re-export tracing macros with log_* naming
pub(crate) use tracing::{debug as log_debug, error as log_error, warn as log_warn};
