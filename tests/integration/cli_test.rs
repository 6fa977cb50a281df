//! Integration tests for the ttykit binary.

use std::io::Write;

use predicates::prelude::*;
use tempfile::NamedTempFile;

use crate::helpers::ttykit;

// ============================================================================
// Non-interactive Input
// ============================================================================

#[test]
fn select_without_tty_fails_with_not_a_terminal() {
    ttykit()
        .args(["select", "a", "b"])
        .write_stdin("")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not a terminal"));
}

#[test]
fn confirm_and_keys_also_require_tty() {
    for args in [vec!["confirm", "Sure?"], vec!["keys"], vec!["multi", "x"]] {
        ttykit()
            .args(&args)
            .write_stdin("y")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("not a terminal"));
    }
}

// ============================================================================
// Capabilities
// ============================================================================

#[test]
fn caps_reports_truecolor_from_colorterm() {
    ttykit()
        .arg("caps")
        .env("COLORTERM", "truecolor")
        .env("COLUMNS", "100")
        .env("LINES", "30")
        .assert()
        .success()
        .stdout(predicate::str::contains("color: truecolor"))
        .stdout(predicate::str::contains("stdin tty: no"))
        .stdout(predicate::str::contains("stdout tty: no"))
        .stdout(predicate::str::contains("size: 100x30"))
        .stdout(predicate::str::contains("\x1b[38;2;255;135;0;1mttykit\x1b[0m"));
}

#[test]
fn caps_honors_no_color() {
    ttykit()
        .arg("caps")
        .env("COLORTERM", "truecolor")
        .env("NO_COLOR", "1")
        .assert()
        .success()
        .stdout(predicate::str::contains("color: none"))
        .stdout(predicate::str::contains("sample: ttykit\n"))
        .stdout(predicate::str::contains("size: 80x24"));
}

#[test]
fn caps_uses_term_when_piped() {
    ttykit()
        .arg("caps")
        .env("TERM", "xterm-256color")
        .assert()
        .success()
        .stdout(predicate::str::contains("color: 256"));
}

#[test]
fn config_file_can_force_color() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[color]\nmode = \"always\"").unwrap();

    ttykit()
        .arg("--config")
        .arg(file.path())
        .arg("caps")
        .assert()
        .success()
        .stdout(predicate::str::contains("color: 16"));
}

#[test]
fn invalid_config_file_is_reported() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[color]\nmode = 3").unwrap();

    ttykit()
        .args(["caps", "--config"])
        .arg(file.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid config file"));
}

// ============================================================================
// Tables
// ============================================================================

#[test]
fn table_renders_single_border() {
    let output = ttykit()
        .args(["table", "--headers", "Name,Qty", "apple,3", "kiwi,12"])
        .output()
        .unwrap();
    assert!(output.status.success());
    insta::assert_snapshot!(String::from_utf8_lossy(&output.stdout).trim_end(), @r###"
    ┌───────┬─────┐
    │ Name  │ Qty │
    ├───────┼─────┤
    │ apple │ 3   │
    │ kiwi  │ 12  │
    └───────┴─────┘
    "###);
}

#[test]
fn table_ascii_right_aligned() {
    ttykit()
        .args(["table", "-b", "ascii", "-a", "l,r", "apple,3", "kiwi,12"])
        .assert()
        .success()
        .stdout("+-------+----+\n| apple |  3 |\n| kiwi  | 12 |\n+-------+----+\n");
}

#[test]
fn table_rejects_unknown_alignment() {
    ttykit()
        .args(["table", "--align", "l,sideways", "a,b"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown alignment: sideways"));
}

// ============================================================================
// Widgets
// ============================================================================

#[test]
fn progress_runs_to_completion() {
    ttykit()
        .args(["progress", "--total", "3", "--delay-ms", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("100% 3/3"))
        .stdout(predicate::str::contains("\r\x1b[2K"))
        .stdout(predicate::str::ends_with("\r\x1b[2Kdone\r\n"));
}

// ============================================================================
// Help
// ============================================================================

#[test]
fn help_lists_subcommands() {
    ttykit()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("select"))
        .stdout(predicate::str::contains("multi"))
        .stdout(predicate::str::contains("confirm"))
        .stdout(predicate::str::contains("keys"))
        .stdout(predicate::str::contains("table"))
        .stdout(predicate::str::contains("progress"))
        .stdout(predicate::str::contains("caps"));
}
