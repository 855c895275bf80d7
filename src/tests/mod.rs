// Test modules for switchlog
//
// Test organization follows the template pattern where each source file
// has a corresponding test file that focuses on behavior verification.

// Test helper utilities
pub mod helpers;

pub mod env;
pub mod error;
pub mod mechanism;
