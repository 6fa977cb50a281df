//! Shared helpers for integration tests.

use assert_cmd::Command;

use ttykit::env::MapEnv;
use ttykit::terminal::ScriptedBackend;
use ttykit::Terminal;

/// The ttykit binary with a clean environment, so capability detection
/// only sees the variables a test sets.
pub fn ttykit() -> Command {
    let mut cmd = Command::cargo_bin("ttykit").expect("ttykit binary should be built");
    cmd.env_clear();
    cmd
}

/// A raw-mode terminal fed with `keys`, colors off.
pub fn scripted_terminal(keys: &[&[u8]]) -> Terminal<ScriptedBackend> {
    let backend = ScriptedBackend::tty().with_input(keys);
    let mut term = Terminal::with_env(backend, MapEnv::new().with("NO_COLOR", "1"));
    term.enter().expect("scripted backend is a tty");
    term
}
