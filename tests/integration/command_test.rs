//! Tests for declaring and running commands through the public API.

use std::io::Write;

use ttykit::command::{self, Argument, Command, CommandSpec, Matches, Opt};

struct Export;

impl Command for Export {
    fn spec(&self) -> CommandSpec {
        CommandSpec::new("export", "Export a session")
            .argument(Argument::required("name", "Session to export"))
            .option(Opt::value("output", "Destination file").short('o'))
    }

    fn execute(&self, matches: &Matches, out: &mut dyn Write) -> i32 {
        let name = matches.value("name").unwrap_or_default();
        let output = matches.value("output").unwrap_or("-");
        let _ = writeln!(out, "{name} -> {output}");
        0
    }
}

fn run(args: &[&str]) -> (i32, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = command::run(&Export, args, &mut out, &mut err);
    (
        code,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

#[test]
fn missing_required_argument_exits_1_with_help() {
    let (code, out, err) = run(&["--output=out.txt"]);
    assert_eq!(code, 1);
    assert!(out.is_empty());
    insta::assert_snapshot!(err.trim_end(), @r###"
    Missing required argument: name

    Export a session

    Usage: export [OPTIONS] <name>

    Arguments:
      <name>  Session to export

    Options:
      -o, --output <OUTPUT>  Destination file
      -h, --help             Print help
    "###);
}

#[test]
fn help_exits_0_before_validation() {
    let (code, out, err) = run(&["--unknown", "--help"]);
    assert_eq!(code, 0);
    assert!(out.starts_with("Export a session\n\nUsage: export"));
    assert!(err.is_empty());
}

#[test]
fn unknown_option_exits_1_without_help() {
    let (code, _, err) = run(&["session", "--format", "json"]);
    assert_eq!(code, 1);
    assert_eq!(err, "Unknown option: --format\n");
}

#[test]
fn short_option_with_attached_value() {
    let (code, out, _) = run(&["-oout.json", "demo"]);
    assert_eq!(code, 0);
    assert_eq!(out, "demo -> out.json\n");
}
