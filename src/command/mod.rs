//! Declarative commands.
//!
//! A [`Command`] describes its arguments and options with a
//! [`CommandSpec`], which is turned into a `clap` command for parsing and
//! help. [`run`] parses a command line against it, prints help or errors,
//! and otherwise hands the [`Matches`] to [`execute`](Command::execute).

mod help;
mod parser;
mod spec;

use std::io::Write;

pub use help::help;
pub use parser::{parse, Matches, ParseError};
pub use spec::{Argument, CommandSpec, Opt};

/// A runnable command.
pub trait Command {
    /// Arguments and options this command accepts.
    fn spec(&self) -> CommandSpec;

    /// Do the work and return the process exit code.
    fn execute(&self, matches: &Matches, out: &mut dyn Write) -> i32;
}

/// Parse `args` for `command` and run it, returning the exit code.
///
/// `-h`/`--help` prints help to `out` and returns 0. A missing required
/// argument prints the error and the help to `err`; any other parse error
/// prints a single line. Both return 1.
pub fn run<S: AsRef<str>>(
    command: &dyn Command,
    args: &[S],
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> i32 {
    let spec = command.spec();
    match parse(&spec, args) {
        Ok(matches) if matches.help_requested() => {
            let _ = writeln!(out, "{}", help(&spec));
            0
        }
        Ok(matches) => {
            tracing::debug!(command = %spec.name, "executing command");
            command.execute(&matches, out)
        }
        Err(e @ ParseError::MissingArgument(_)) => {
            let _ = writeln!(err, "{e}\n\n{}", help(&spec));
            1
        }
        Err(e) => {
            let _ = writeln!(err, "{e}");
            1
        }
    }
}
