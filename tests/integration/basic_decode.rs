//! Integration tests for decoding events from stdin and files.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

#[allow(deprecated)]
fn clef() -> Command {
    let mut cmd = Command::cargo_bin("clef").unwrap();
    cmd.env("XDG_CONFIG_HOME", "/tmp/clef-test-no-config");
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn empty_stdin_exits_zero() {
    clef().write_stdin("").assert().success().stdout("");
}

#[test]
fn blank_lines_only_exits_zero() {
    clef().write_stdin("\n   \n\t\n").assert().success().stdout("");
}

#[test]
fn timestamp_only_event() {
    let input = r#"{"@t":"2026-01-15T10:30:00.123Z"}"#;
    clef()
        .arg("--color=never")
        .write_stdin(input)
        .assert()
        .success()
        .stdout("10:30:00.123   INFO:\n");
}

#[test]
fn template_rendered_with_properties() {
    let input = r#"{"@t":"2026-01-15T10:30:00Z","@mt":"Hello, {Name}","Name":"Bob","Port":8080}"#;
    clef()
        .arg("--color=never")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("INFO: Hello, Bob"))
        .stdout(predicate::str::contains("Name: Bob"))
        .stdout(predicate::str::contains("Port: 8080"));
}

#[test]
fn renderings_used_in_message() {
    let input = r#"{"@t":"2026-01-15T10:30:00Z","@mt":"Took {Elapsed:0.0} ms","@r":["12.3"],"Elapsed":12.345}"#;
    clef()
        .arg("--color=never")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Took 12.3 ms"))
        .stdout(predicate::str::contains("Elapsed: 12.345"));
}

#[test]
fn plain_message_braces_are_literal() {
    let input = r#"{"@t":"2026-01-15T10:30:00Z","@m":"set {x} to 1","x":"y"}"#;
    clef()
        .arg("--color=never")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("INFO: set {x} to 1"));
}

#[test]
fn level_badges() {
    let input = concat!(
        r#"{"@t":"2026-01-15T10:30:00Z","@l":"warning","@m":"a"}"#,
        "\n",
        r#"{"@t":"2026-01-15T10:30:00Z","@l":"FATAL","@m":"b"}"#,
        "\n",
    );
    clef()
        .arg("--color=never")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains(" WARN: a"))
        .stdout(predicate::str::contains("FATAL: b"));
}

#[test]
fn escaped_property_name_unescaped() {
    let input = r#"{"@t":"2026-01-15T10:30:00Z","@@xpto":"user value"}"#;
    clef()
        .arg("--color=never")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("@xpto: user value"))
        .stdout(predicate::str::contains("@@xpto").not());
}

#[test]
fn exception_printed_after_properties() {
    let input = r#"{"@t":"2026-01-15T10:30:00Z","@l":"Error","@m":"failed","@x":"System.Exception: boom\n   at Program.Main()"}"#;
    clef()
        .arg("--color=never")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("ERROR: failed"))
        .stdout(predicate::str::contains("System.Exception: boom\n   at Program.Main()"));
}

#[test]
fn reads_files_in_order() {
    let mut first = tempfile::NamedTempFile::new().unwrap();
    writeln!(first, r#"{{"@t":"2026-01-15T10:30:00Z","@m":"from first"}}"#).unwrap();
    let mut second = tempfile::NamedTempFile::new().unwrap();
    writeln!(second, r#"{{"@t":"2026-01-15T10:30:01Z","@m":"from second"}}"#).unwrap();

    let output = clef()
        .arg("--color=never")
        .arg(first.path())
        .arg(second.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let a = stdout.find("from first").unwrap();
    let b = stdout.find("from second").unwrap();
    assert!(a < b, "events should follow file order");
}

#[test]
fn missing_file_is_io_error() {
    clef()
        .arg("/nonexistent/events.clef")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("clef: /nonexistent/events.clef"));
}

#[test]
fn completions_generated() {
    clef()
        .arg("--completions")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("clef"));
}
