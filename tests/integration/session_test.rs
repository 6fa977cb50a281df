//! End-to-end tests driving a terminal session through a scripted backend.

use std::time::Duration;

use ttykit::prompt::{self, PromptTheme};
use ttykit::terminal::{ScriptedBackend, StateFlags};
use ttykit::{KeyEvent, NamedKey, StyleSpec, TermError, Terminal};

use crate::helpers::scripted_terminal;

const DOWN: &[u8] = b"\x1b[B";
const ENTER: &[u8] = b"\r";
const SPACE: &[u8] = b" ";

#[test]
fn enter_on_non_tty_is_not_a_terminal() {
    let mut term = Terminal::new(ScriptedBackend::not_tty());
    let err = term.enter().unwrap_err();
    assert!(matches!(err, TermError::NotATerminal));
    assert!(err.to_string().contains("not a terminal"));
}

#[test]
fn single_select_down_down_enter_yields_c() {
    let mut term = scripted_terminal(&[DOWN, DOWN, ENTER]);
    let picked =
        prompt::select_value(&mut term, &PromptTheme::default(), "Pick", &["A", "B", "C"], 0)
            .unwrap();
    assert_eq!(picked.as_deref(), Some("C"));
}

#[test]
fn multi_select_yields_a_and_c_in_option_order() {
    let mut term = scripted_terminal(&[SPACE, DOWN, DOWN, SPACE, ENTER]);
    let options = ["A", "B", "C"];
    let picked = prompt::multi_select(&mut term, &PromptTheme::default(), "Pick", &options, &[])
        .unwrap()
        .unwrap();
    let values: Vec<&str> = picked.iter().map(|&i| options[i]).collect();
    assert_eq!(values, ["A", "C"]);
}

#[test]
fn style_red_bold() {
    let spec = StyleSpec::new().fg("red".parse().unwrap()).bold();
    let styled = ttykit::style("Hi", &spec, ttykit::ColorCapability::Basic16);
    assert_eq!(styled, "\x1b[31;1mHi\x1b[0m");
}

#[test]
fn exit_twice_emits_reset_once() {
    let mut term = scripted_terminal(&[]);
    term.hide_cursor().unwrap();
    term.enter_alternate_screen().unwrap();
    term.exit();
    let after_first = term.backend().output().len();
    term.exit();
    assert_eq!(term.backend().output().len(), after_first);
    assert_eq!(term.state().flags(), StateFlags::empty());
}

#[test]
fn keys_are_read_with_timeouts() {
    let mut term = scripted_terminal(&[b"\x1bOP", "é".as_bytes()]);
    assert_eq!(
        term.read_key(Some(Duration::from_millis(10))).unwrap(),
        Some(KeyEvent::from(NamedKey::F1))
    );
    assert_eq!(term.read_key(None).unwrap(), Some(KeyEvent::char('é')));
    assert_eq!(term.read_key(Some(Duration::from_millis(10))).unwrap(), None);
}

#[test]
fn confirm_takes_default_on_enter() {
    let mut term = scripted_terminal(&[ENTER]);
    assert_eq!(prompt::confirm(&mut term, "Proceed?", true).unwrap(), Some(true));
}
