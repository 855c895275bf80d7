// Unit Tests for Output Mechanisms
//
// UNIT UNDER TEST: Descriptor, StderrMechanism, SyslogMechanism
//
// BUSINESS RESPONSIBILITY:
//   - Wraps each backend with an initialized flag that tracks its lifecycle
//   - Writes rendered text verbatim, one line per message, to stderr
//   - Maps loglevels onto syslog priorities and talks to the syslog socket
//
// TEST COVERAGE:
//   - init runs once and sets the flag, deinit clears it
//   - Stderr output format
//   - Syslog priority mapping, message framing and socket round trip
//   - Syslog init failure when no socket is reachable
//   - Syslog reconnect after the daemon recreates its socket

use crate::error::LogError;
use crate::level::LogLevel;
use crate::mechanism::{
    Descriptor, Mechanism, NullMechanism, StderrMechanism, SyslogConfig, SyslogFacility,
    SyslogMechanism, SyslogSeverity,
};
use crate::tests::helpers::{RecordingMechanism, SharedBuffer};
use std::path::PathBuf;

#[cfg(test)]
mod descriptor_lifecycle_tests {
    use super::*;

    #[test]
    fn test_init_sets_flag_and_runs_once() {
        let (mechanism, calls) = RecordingMechanism::new("recorder");
        let mut descriptor = Descriptor::custom(Box::new(mechanism));

        descriptor.init().unwrap();
        descriptor.init().unwrap();

        assert!(descriptor.is_initialized());
        assert_eq!(calls.lock().unwrap().init, 1);
    }

    #[test]
    fn test_deinit_clears_flag() {
        let (mechanism, calls) = RecordingMechanism::new("recorder");
        let mut descriptor = Descriptor::custom(Box::new(mechanism));

        descriptor.init().unwrap();
        descriptor.deinit();

        assert!(!descriptor.is_initialized());
        assert_eq!(calls.lock().unwrap().deinit, 1);
    }

    #[test]
    fn test_failed_init_leaves_flag_clear() {
        let (mechanism, _calls) = RecordingMechanism::failing("broken");
        let mut descriptor = Descriptor::custom(Box::new(mechanism));

        let result = descriptor.init();

        assert!(matches!(result, Err(LogError::InitFailed { .. })));
        assert!(!descriptor.is_initialized());
    }

    #[test]
    fn test_builtin_names() {
        assert_eq!(Descriptor::null(NullMechanism).name(), "null");
        assert_eq!(Descriptor::stderr(StderrMechanism::new()).name(), "stderr");
        assert_eq!(Descriptor::syslog(SyslogMechanism::default()).name(), "syslog");
        assert!(!Descriptor::null(NullMechanism).is_custom());
    }
}

#[cfg(test)]
mod stderr_mechanism_tests {
    use super::*;

    #[test]
    fn test_writes_text_verbatim_one_line_each() {
        let buffer = SharedBuffer::new();
        let mut mechanism = StderrMechanism::with_writer(Box::new(buffer.clone()));

        mechanism.log(LogLevel::Info, "plain message");
        mechanism.log(LogLevel::Warning, "warning: disk full");

        assert_eq!(buffer.contents(), "plain message\nwarning: disk full\n");
    }
}

#[cfg(test)]
mod syslog_mechanism_tests {
    use super::*;

    fn syslog_with(socket_path: PathBuf) -> SyslogMechanism {
        SyslogMechanism::new(SyslogConfig {
            ident: Some("switchlog-test".to_string()),
            socket_path: Some(socket_path),
            facility: SyslogFacility::User,
        })
    }

    #[test]
    fn test_severity_mapping() {
        assert_eq!(SyslogSeverity::from(LogLevel::VeryNoisy), SyslogSeverity::Debug);
        assert_eq!(SyslogSeverity::from(LogLevel::Debug), SyslogSeverity::Debug);
        assert_eq!(SyslogSeverity::from(LogLevel::Verbose), SyslogSeverity::Info);
        assert_eq!(SyslogSeverity::from(LogLevel::Notice), SyslogSeverity::Notice);
        assert_eq!(SyslogSeverity::from(LogLevel::Warning), SyslogSeverity::Warning);
        assert_eq!(SyslogSeverity::from(LogLevel::Error), SyslogSeverity::Error);
        assert_eq!(SyslogSeverity::from(LogLevel::Quiet), SyslogSeverity::Critical);
    }

    #[test]
    fn test_priority_combines_facility_and_severity() {
        let user = syslog_with(PathBuf::from("/nonexistent"));
        let local0 = SyslogMechanism::new(SyslogConfig {
            facility: SyslogFacility::Local0,
            ..SyslogConfig::default()
        });

        assert_eq!(user.priority(LogLevel::Warning), 12);
        assert_eq!(user.priority(LogLevel::Error), 11);
        assert_eq!(local0.priority(LogLevel::Info), 134);
    }

    #[test]
    fn test_message_framing() {
        let mechanism = syslog_with(PathBuf::from("/nonexistent"));

        let message = mechanism.format_message(LogLevel::Notice, "service started");

        assert_eq!(
            message,
            format!("<13>switchlog-test[{}]: service started", std::process::id())
        );
    }

    #[test]
    fn test_init_fails_without_socket() {
        let mut mechanism = syslog_with(PathBuf::from("/nonexistent/switchlog/log.sock"));

        let result = mechanism.init();

        assert!(matches!(
            result,
            Err(LogError::InitFailed { ref mechanism, .. }) if mechanism == "syslog"
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_messages_reach_the_socket() {
        use std::os::unix::net::UnixDatagram;

        let path = std::env::temp_dir().join(format!("switchlog-syslog-{}.sock", std::process::id()));
        let _ = std::fs::remove_file(&path);
        let daemon = UnixDatagram::bind(&path).expect("bind test syslog socket");
        let mut mechanism = syslog_with(path.clone());

        mechanism.init().expect("socket is reachable");
        mechanism.log(LogLevel::Error, "disk failure");

        let mut buf = [0u8; 512];
        let received = daemon.recv(&mut buf).expect("datagram delivered");
        let text = String::from_utf8_lossy(&buf[..received]);
        assert!(text.starts_with("<11>switchlog-test["), "got {text}");
        assert!(text.ends_with("]: disk failure"), "got {text}");

        mechanism.deinit();
        let _ = std::fs::remove_file(&path);
    }

    #[cfg(unix)]
    #[test]
    fn test_reconnects_after_daemon_restart() {
        use std::os::unix::net::UnixDatagram;
        use std::time::Duration;

        let path = std::env::temp_dir()
            .join(format!("switchlog-syslog-restart-{}.sock", std::process::id()));
        let _ = std::fs::remove_file(&path);
        let daemon = UnixDatagram::bind(&path).expect("bind test syslog socket");
        let mut mechanism = syslog_with(path.clone());
        mechanism.init().expect("socket is reachable");
        let mut buf = [0u8; 512];

        mechanism.log(LogLevel::Error, "one");
        let received = daemon.recv(&mut buf).expect("first datagram delivered");
        assert!(String::from_utf8_lossy(&buf[..received]).ends_with("]: one"));

        drop(daemon);
        std::fs::remove_file(&path).expect("remove old socket");
        let restarted = UnixDatagram::bind(&path).expect("rebind test syslog socket");
        restarted
            .set_read_timeout(Some(Duration::from_secs(2)))
            .expect("set read timeout");

        mechanism.log(LogLevel::Error, "two");

        let received = restarted.recv(&mut buf).expect("datagram delivered after restart");
        let text = String::from_utf8_lossy(&buf[..received]);
        assert!(text.ends_with("]: two"), "got {text}");

        mechanism.deinit();
        let _ = std::fs::remove_file(&path);
    }
}
