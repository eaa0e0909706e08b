//! Integration tests for undecodable lines under `--on-error`.

use assert_cmd::Command;
use predicates::prelude::*;

#[allow(deprecated)]
fn clef() -> Command {
    let mut cmd = Command::cargo_bin("clef").unwrap();
    cmd.env("XDG_CONFIG_HOME", "/tmp/clef-test-no-config");
    cmd.env_remove("RUST_LOG");
    cmd
}

const MIXED: &str = concat!(
    r#"{"@t":"2026-01-15T10:30:00Z","@m":"first"}"#,
    "\n",
    "not json at all\n",
    r#"{"@m":"no timestamp"}"#,
    "\n",
    r#"{"@t":"2026-01-15T10:30:00Z","@l":"Critical-ish"}"#,
    "\n",
    r#"{"@t":"2026-01-15T10:30:00Z","@m":"last"}"#,
    "\n",
);

#[test]
fn skip_is_default() {
    let output = clef()
        .arg("--color=never")
        .write_stdin(MIXED)
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("first"));
    assert!(stdout.contains("last"));
    assert_eq!(stdout.lines().count(), 2);
}

#[test]
fn skip_warns_with_line_numbers() {
    let output = clef()
        .arg("--color=never")
        .arg("--on-error=skip")
        .write_stdin(MIXED)
        .output()
        .unwrap();
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("line 2"), "stderr: {stderr}");
    assert!(stderr.contains("line 3"), "stderr: {stderr}");
    assert!(stderr.contains("line 4"), "stderr: {stderr}");
}

#[test]
fn abort_stops_at_first_bad_line() {
    clef()
        .arg("--color=never")
        .arg("--on-error=abort")
        .write_stdin(MIXED)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("first"))
        .stdout(predicate::str::contains("last").not())
        .stderr(predicate::str::contains("clef: <stdin>: line 2"));
}

#[test]
fn abort_reports_missing_timestamp() {
    clef()
        .arg("--on-error=abort")
        .write_stdin("\n\n{\"@m\":\"hi\"}\n")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "line 3: required field `@t` is missing",
        ));
}

#[test]
fn abort_rejects_non_object_line() {
    clef()
        .arg("--on-error=abort")
        .write_stdin("[1,2,3]\n")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("line 1: expected a JSON object"));
}
