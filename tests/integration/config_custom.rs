//! Integration tests for property filtering and the config file.

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

const INPUT: &str =
    r#"{"@t":"2026-01-15T10:30:00Z","@m":"test","Port":8080,"Host":"localhost","Pid":1234}"#;

#[test]
fn include_fields_shows_only_specified() {
    let output = clef()
        .arg("--color=never")
        .arg("--include-fields=Port")
        .write_stdin(INPUT)
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Port: 8080"), "included field should appear");
    assert!(!stdout.contains("Host:"), "non-included field should be hidden");
    assert!(!stdout.contains("Pid:"), "non-included field should be hidden");
}

#[test]
fn exclude_fields_hides_specified() {
    let output = clef()
        .arg("--color=never")
        .arg("--exclude-fields=Pid,Host")
        .write_stdin(INPUT)
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Port: 8080"));
    assert!(!stdout.contains("Host:"));
    assert!(!stdout.contains("Pid:"));
}

#[test]
fn include_and_exclude_mutually_exclusive() {
    clef()
        .arg("--include-fields=Port")
        .arg("--exclude-fields=Pid")
        .write_stdin(INPUT)
        .assert()
        .failure()
        .code(2); // clap uses exit code 2 for argument errors
}

#[test]
fn custom_max_field_length() {
    let long_val = "x".repeat(50);
    let input = format!(r#"{{"@t":"2026-01-15T10:30:00Z","Data":"{long_val}"}}"#);
    clef()
        .arg("--color=never")
        .arg("--max-field-length=10")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("{}…", "x".repeat(10))));
}

#[test]
fn config_file_applied() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
on_error = "abort"
timestamp_format = "%Y-%m-%d %H:%M"

[fields]
exclude = ["Pid"]
"#
    )
    .unwrap();

    let output = clef()
        .arg("--color=never")
        .arg("--config")
        .arg(file.path())
        .write_stdin(format!("{INPUT}\nnot json\n"))
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1), "on_error = abort from file");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("2026-01-15 10:30  "));
    assert!(!stdout.contains("Pid:"));
}

#[test]
fn config_file_from_xdg_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("clef")).unwrap();
    std::fs::write(
        dir.path().join("clef").join("config.toml"),
        "max_field_length = 3\n",
    )
    .unwrap();

    clef()
        .env("XDG_CONFIG_HOME", dir.path())
        .arg("--color=never")
        .write_stdin(INPUT)
        .assert()
        .success()
        .stdout(predicate::str::contains("Host: loc…"));
}

#[test]
fn invalid_config_file_exits_one() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "on_error = \"sometimes\"").unwrap();

    clef()
        .arg("--config")
        .arg(file.path())
        .write_stdin(INPUT)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid on_error policy"));
}
