#![allow(deprecated)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin;
use predicates::prelude::*;
use serde_json::Value;

fn autoanchor() -> Command {
    let mut cmd = Command::new(cargo_bin("autoanchor"));
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Run with `args`, expecting a failed envelope, and return it.
fn failure(args: &[&str]) -> Value {
    let output = autoanchor().args(args).assert().failure().get_output().clone();
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 1, "expected one JSON line: {stdout:?}");

    let envelope: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(envelope["success"], false);
    assert!(
        envelope["message"].as_str().is_some_and(|m| !m.is_empty()),
        "failure without message: {envelope}"
    );
    assert!(envelope.get("data").is_none());
    envelope
}

#[test]
fn test_invalid_button_is_rejected() {
    let envelope = failure(&["click", "invalid"]);
    assert_eq!(envelope["code"], "InvalidArgument");
}

#[test]
fn test_negative_coordinate_is_rejected() {
    let envelope = failure(&["move-cursor", "-5", "10"]);
    assert_eq!(envelope["code"], "InvalidArgument");
}

#[test]
fn test_nan_coordinate_is_rejected() {
    let envelope = failure(&["move-cursor", "NaN", "3"]);
    assert_eq!(envelope["code"], "InvalidArgument");
}

#[test]
fn test_half_a_click_point_is_rejected() {
    let envelope = failure(&["click", "left", "400"]);
    assert_eq!(envelope["code"], "InvalidArgument");
}

#[test]
fn test_unknown_key_is_unsupported() {
    let envelope = failure(&["press-key", "hyper"]);
    assert_eq!(envelope["code"], "UnsupportedKey");
}

#[test]
fn test_unknown_modifier_is_unsupported() {
    let envelope = failure(&["press-key", "c", "hyper"]);
    assert_eq!(envelope["code"], "UnsupportedKey");
}

#[test]
fn test_unknown_command_is_invalid() {
    let envelope = failure(&["double-click"]);
    assert_eq!(envelope["code"], "InvalidArgument");
}

#[test]
fn test_missing_argument_is_invalid() {
    let envelope = failure(&["move-cursor", "5"]);
    assert_eq!(envelope["code"], "InvalidArgument");
    assert!(envelope["message"].as_str().unwrap().contains("<Y>"));
}

#[test]
fn test_type_text_without_payload_is_invalid() {
    let envelope = failure(&["type-text"]);
    assert_eq!(envelope["code"], "InvalidArgument");
}

#[test]
fn test_missing_command_is_invalid() {
    let envelope = failure(&[]);
    assert_eq!(envelope["code"], "InvalidArgument");
}

#[test]
fn test_help_exits_cleanly() {
    autoanchor()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("cursor-position"));
}

#[test]
fn test_logs_stay_off_stdout() {
    autoanchor()
        .args(["--verbose", "click", "invalid"])
        .assert()
        .failure()
        .stdout(predicate::str::starts_with("{\"success\":false"));
}

#[cfg(all(target_os = "linux", feature = "x11"))]
mod headless {
    use super::*;

    fn headless(args: &[&str]) -> Value {
        let output = autoanchor()
            .env_remove("DISPLAY")
            .env_remove("WAYLAND_DISPLAY")
            .args(args)
            .assert()
            .failure()
            .get_output()
            .clone();
        let stdout = String::from_utf8(output.stdout).unwrap();
        assert_eq!(stdout.lines().count(), 1, "expected one JSON line: {stdout:?}");
        serde_json::from_str(&stdout).unwrap()
    }

    #[test]
    fn test_option_like_text_is_typed_verbatim() {
        for payload in ["-v", "--", "--help", "--delay-ms"] {
            let envelope = headless(&["type-text", payload]);
            assert_eq!(envelope["success"], false, "{payload}");
            assert_eq!(envelope["code"], "PlatformUnsupported", "{payload}");
        }
    }

    #[test]
    fn test_screenshot_without_display_fails_capture() {
        let envelope = headless(&["screenshot"]);
        assert_eq!(envelope["success"], false);
        assert_eq!(envelope["code"], "CaptureFailed");
        assert!(envelope.get("data").is_none());
    }

    #[test]
    fn test_query_without_display_is_unsupported() {
        let envelope = headless(&["cursor-position"]);
        assert_eq!(envelope["code"], "PlatformUnsupported");
    }

    #[test]
    fn test_validation_runs_before_connecting() {
        let envelope = headless(&["press-key", "hyper"]);
        assert_eq!(envelope["code"], "UnsupportedKey");
    }
}
