//! Integration tests for color control: `NO_COLOR`, --color flag, `TERM`.

use assert_cmd::Command;

#[allow(deprecated)]
fn clef() -> Command {
    let mut cmd = Command::cargo_bin("clef").unwrap();
    cmd.env("XDG_CONFIG_HOME", "/tmp/clef-test-no-config");
    cmd
}

const INPUT: &str = r#"{"@t":"2026-01-15T10:30:00Z","@m":"hello","Port":8080}"#;

#[test]
fn color_never_disables_ansi() {
    let output = clef()
        .arg("--color=never")
        .write_stdin(INPUT)
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        !stdout.contains("\x1b["),
        "Should not contain ANSI escapes with --color=never"
    );
}

#[test]
fn color_always_enables_ansi() {
    let output = clef()
        .arg("--color=always")
        .write_stdin(INPUT)
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("\x1b["),
        "Should contain ANSI escapes with --color=always"
    );
    assert!(stdout.contains("hello"));
}

#[test]
fn piped_auto_mode_has_no_colors() {
    let output = clef().write_stdin(INPUT).output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    // stdout is a pipe under test → auto disables colors
    assert!(!stdout.contains("\x1b["));
}

#[test]
fn color_always_overrides_no_color() {
    let output = clef()
        .env("NO_COLOR", "1")
        .env("TERM", "dumb")
        .arg("--color=always")
        .write_stdin(INPUT)
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\x1b["));
}
