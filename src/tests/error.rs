// Unit Tests for the Error Taxonomy
//
// UNIT UNDER TEST: LogError
//
// BUSINESS RESPONSIBILITY:
//   - Names every way configuring or using the facility can fail
//   - Routes errors by category and picks the side-channel severity
//   - Renders messages that identify the offending value
//
// TEST COVERAGE:
//   - Category and severity mapping per variant
//   - Display output carrying the rejected value
//   - Source chaining for initialization failures

use crate::error::{ErrorCategory, LogError};
use crate::level::LogLevel;
use std::error::Error as _;

#[cfg(test)]
mod log_error_categorization_tests {
    use super::*;

    #[test]
    fn test_lookup_failures_are_client_errors() {
        let errors = [
            LogError::invalid_level(0),
            LogError::unknown_level_name("loud"),
            LogError::unknown_mechanism("foo"),
            LogError::null_input("log mechanism name"),
            LogError::invalid_mechanism_name("list", "reserved"),
            LogError::mechanism_in_use("custom"),
            LogError::configuration_error("bad key"),
        ];

        for error in errors {
            assert_eq!(error.category(), ErrorCategory::Client, "{error}");
            assert_eq!(error.severity(), LogLevel::Error);
        }
    }

    #[test]
    fn test_init_failure_is_external() {
        let error = LogError::init_failed("syslog", "no socket", None);

        assert_eq!(error.category(), ErrorCategory::External);
        assert_eq!(error.severity(), LogLevel::Error);
    }

    #[test]
    fn test_format_failure_is_internal_warning() {
        let error = LogError::format_failed("message truncated to 8 bytes");

        assert_eq!(error.category(), ErrorCategory::Internal);
        assert_eq!(error.severity(), LogLevel::Warning);
    }

    #[test]
    fn test_busy_is_internal() {
        assert_eq!(LogError::busy().category(), ErrorCategory::Internal);
    }
}

#[cfg(test)]
mod log_error_display_tests {
    use super::*;

    #[test]
    fn test_unknown_mechanism_message_quotes_the_name() {
        let error = LogError::unknown_mechanism("foo");

        assert_eq!(error.to_string(), "Unknown logging mechanism: \"foo\"");
    }

    #[test]
    fn test_invalid_level_message_shows_the_value() {
        assert_eq!(LogError::invalid_level(12).to_string(), "Invalid loglevel: 12");
    }

    #[test]
    fn test_init_failure_keeps_io_source() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "no such socket");
        let error = LogError::init_failed("syslog", "connect failed", Some(io_error));

        assert!(error.to_string().contains("\"syslog\""));
        let source = error.source().expect("source is chained");
        assert_eq!(source.to_string(), "no such socket");
    }

    #[test]
    fn test_null_input_names_the_argument() {
        let error = LogError::null_input("log mechanism name");

        assert_eq!(error.to_string(), "No log mechanism name provided");
    }
}
