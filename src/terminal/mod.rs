//! Terminal session control.
//!
//! [`Terminal`] owns the raw/cooked state of one terminal and emits every
//! cursor and screen escape sequence. The device itself sits behind the
//! [`Backend`] trait: [`TtyBackend`] for the real terminal and
//! [`ScriptedBackend`] for tests.

mod backend;
mod controller;
#[cfg(unix)]
mod safety;
mod scripted;
mod state;
#[cfg(unix)]
mod tty;

pub use backend::Backend;
pub use controller::Terminal;
#[cfg(unix)]
pub use safety::{is_armed, restore_now};
pub use scripted::{ModeCall, ScriptedBackend, ScriptedMode};
pub use state::{Size, StateFlags, TerminalState};
#[cfg(unix)]
pub use tty::TtyBackend;
