//! Help text generation.

use super::spec::CommandSpec;

/// Render usage and the argument/option tables for `spec`, as clap lays
/// them out, without styling or a trailing newline.
pub fn help(spec: &CommandSpec) -> String {
    let rendered = spec.to_clap().render_help().to_string();
    rendered.trim_end().to_string()
}
