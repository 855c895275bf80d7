// Unit Tests for Environment Stores
//
// UNIT UNDER TEST: MemoryEnv, ProcessEnv
//
// TEST COVERAGE:
//   - In-memory set/get/remove
//   - Process environment passthrough

use crate::env::{EnvStore, MemoryEnv, ProcessEnv};

#[cfg(test)]
mod env_store_tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_memory_env_set_get_remove() {
        let mut env = MemoryEnv::new().with_var("A", "1");

        assert_eq!(env.get("A").as_deref(), Some("1"));
        env.set("A", "2");
        assert_eq!(env.get("A").as_deref(), Some("2"));
        env.remove("A");
        assert_eq!(env.get("A"), None);
    }

    #[test]
    #[serial]
    fn test_process_env_reaches_real_environment() {
        let mut env = ProcessEnv;

        env.set("SWITCHLOG_TEST_PROCESS_ENV", "value");
        assert_eq!(
            std::env::var("SWITCHLOG_TEST_PROCESS_ENV").as_deref(),
            Ok("value")
        );

        env.remove("SWITCHLOG_TEST_PROCESS_ENV");
        assert_eq!(env.get("SWITCHLOG_TEST_PROCESS_ENV"), None);
    }
}
