//! CLI tests for mptcp-check.
//!
//! These tests cover argument parsing and the lookups whose outcome does
//! not depend on the kernel of the machine running them.

use assert_cmd::Command;
use predicates::prelude::*;

fn mptcp_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_mptcp-check"))
}

mod global_flags {
    use super::*;

    #[test]
    fn test_help() {
        mptcp_cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Query the kernel MPTCP connection table"));
    }

    #[test]
    fn test_version() {
        mptcp_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("mptcp-check"));
    }

    #[test]
    fn test_invalid_subcommand() {
        mptcp_cmd()
            .arg("invalid_command")
            .assert()
            .failure()
            .stderr(predicate::str::contains("error"));
    }

    #[test]
    fn test_missing_subcommand() {
        mptcp_cmd().assert().failure();
    }
}

mod active_command {
    use super::*;

    #[test]
    fn test_active_help() {
        mptcp_cmd()
            .args(["active", "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Remote IP address"))
            .stdout(predicate::str::contains("Remote port"));
    }

    #[test]
    fn test_active_missing_port() {
        mptcp_cmd()
            .args(["active", "127.0.0.1"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("PORT"));
    }

    #[test]
    fn test_active_port_out_of_range() {
        mptcp_cmd()
            .args(["active", "127.0.0.1", "70000"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("70000"));
    }

    #[test]
    fn test_active_invalid_address() {
        mptcp_cmd()
            .args(["active", "not-an-ip", "80"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("error"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_active_invalid_address_message() {
        mptcp_cmd()
            .args(["active", "not-an-ip", "80"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("invalid IP address: not-an-ip"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_active_ipv6_not_supported() {
        mptcp_cmd()
            .args(["active", "::1", "80"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("IPv6 addresses are not supported"));
    }
}

mod supported_command {
    use super::*;

    #[cfg(target_os = "linux")]
    #[test]
    fn test_supported_answers() {
        mptcp_cmd()
            .arg("supported")
            .assert()
            .code(predicate::in_iter([0, 1]))
            .stdout(predicate::str::contains("supported"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_supported_json() {
        mptcp_cmd()
            .args(["--json", "supported"])
            .assert()
            .code(predicate::in_iter([0, 1]))
            .stdout(predicate::str::starts_with("{\"supported\":"));
    }

    #[cfg(not(target_os = "linux"))]
    #[test]
    fn test_supported_not_implemented() {
        mptcp_cmd()
            .arg("supported")
            .assert()
            .code(2)
            .stderr(predicate::str::contains("not supported"));
    }
}
