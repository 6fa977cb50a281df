//! Argument parsing against a [`CommandSpec`].

use std::collections::{HashMap, HashSet};

use clap::error::{ContextKind, ContextValue, ErrorKind};

use super::spec::CommandSpec;

/// Why a command line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Option {0} requires a value")]
    MissingValue(String),

    #[error("Option {0} does not take a value")]
    UnexpectedValue(String),

    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    #[error("Unexpected argument: {0}")]
    UnexpectedArgument(String),

    /// Any other rejection, with clap's one-line message.
    #[error("{0}")]
    Invalid(String),
}

impl From<clap::Error> for ParseError {
    fn from(err: clap::Error) -> Self {
        let arg = invalid_arg(&err);
        match err.kind() {
            ErrorKind::UnknownArgument if arg.starts_with('-') => Self::UnknownOption(arg),
            ErrorKind::UnknownArgument => Self::UnexpectedArgument(arg),
            ErrorKind::InvalidValue if supplied_value(&err).is_empty() => {
                Self::MissingValue(option_name(&arg))
            }
            ErrorKind::TooManyValues | ErrorKind::NoEquals => {
                Self::UnexpectedValue(option_name(&arg))
            }
            ErrorKind::MissingRequiredArgument => {
                Self::MissingArgument(arg.trim_matches(['<', '>', '[', ']']).to_string())
            }
            _ => Self::Invalid(first_line(&err)),
        }
    }
}

/// The offending argument as clap reports it, e.g. `--output <OUTPUT>`.
fn invalid_arg(err: &clap::Error) -> String {
    match err.get(ContextKind::InvalidArg) {
        Some(ContextValue::String(arg)) => arg.clone(),
        Some(ContextValue::Strings(args)) => args.first().cloned().unwrap_or_default(),
        _ => String::new(),
    }
}

/// The rejected value; empty when none was supplied.
fn supplied_value(err: &clap::Error) -> &str {
    match err.get(ContextKind::InvalidValue) {
        Some(ContextValue::String(value)) => value.as_str(),
        _ => "",
    }
}

/// `--output <OUTPUT>` or `-o <OUTPUT>` to the bare switch.
fn option_name(arg: &str) -> String {
    arg.split_whitespace().next().unwrap_or(arg).to_string()
}

fn first_line(err: &clap::Error) -> String {
    let rendered = err.render().to_string();
    let line = rendered.lines().next().unwrap_or_default();
    line.strip_prefix("error: ").unwrap_or(line).to_string()
}

/// The result of a successful parse.
///
/// Arguments and value options are looked up by name, with declared
/// defaults filled in for anything not given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Matches {
    help: bool,
    values: HashMap<String, String>,
    flags: HashSet<String>,
}

impl Matches {
    /// Whether `-h`/`--help` was given. Nothing else is parsed in that case.
    pub fn help_requested(&self) -> bool {
        self.help
    }

    /// Value of a positional argument or value option.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Whether a flag was given.
    pub fn flag(&self, name: &str) -> bool {
        self.flags.contains(name)
    }

    fn help() -> Self {
        Self {
            help: true,
            ..Self::default()
        }
    }

    fn from_clap(spec: &CommandSpec, found: &clap::ArgMatches) -> Self {
        let mut matches = Self::default();
        let valued = spec
            .arguments
            .iter()
            .map(|a| &a.name)
            .chain(spec.options.iter().filter(|o| o.takes_value).map(|o| &o.long));
        for name in valued {
            if let Some(value) = found.get_one::<String>(name) {
                matches.values.insert(name.clone(), value.clone());
            }
        }
        for option in spec.options.iter().filter(|o| !o.takes_value) {
            if found.get_flag(&option.long) {
                matches.flags.insert(option.long.clone());
            }
        }
        matches
    }
}

/// Parse `args` (without the program name) against `spec`.
///
/// Accepts `--name=value`, `--name value`, `-x`, `-xVALUE`, `-x VALUE` and
/// clustered short flags (`-vq`). `--` ends option parsing. `-h`/`--help`
/// anywhere before `--` wins over every other check.
///
/// # Errors
/// See [`ParseError`].
pub fn parse<S: AsRef<str>>(spec: &CommandSpec, args: &[S]) -> Result<Matches, ParseError> {
    let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
    let wants_help = args
        .iter()
        .take_while(|a| **a != "--")
        .any(|a| *a == "-h" || *a == "--help");
    if wants_help {
        return Ok(Matches::help());
    }

    let argv = std::iter::once(spec.name.as_str()).chain(args.iter().copied());
    match spec.to_clap().try_get_matches_from(argv) {
        Ok(found) => Ok(Matches::from_clap(spec, &found)),
        Err(err) if err.kind() == ErrorKind::DisplayHelp => Ok(Matches::help()),
        Err(err) => Err(err.into()),
    }
}
