//! Declarative command surface.

use clap::{Arg, ArgAction};

/// A positional argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub name: String,
    pub description: String,
    pub required: bool,
    pub default: Option<String>,
}

impl Argument {
    pub fn required(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            required: true,
            default: None,
        }
    }

    pub fn optional(name: &str, description: &str) -> Self {
        Self {
            required: false,
            ..Self::required(name, description)
        }
    }

    /// Value used when the argument is omitted. Makes it optional.
    pub fn default(mut self, value: &str) -> Self {
        self.required = false;
        self.default = Some(value.to_string());
        self
    }
}

/// A named option: `--long`, optionally with a `-s` shortcut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opt {
    pub long: String,
    pub short: Option<char>,
    pub description: String,
    pub takes_value: bool,
    pub default: Option<String>,
}

impl Opt {
    /// A boolean switch.
    pub fn flag(long: &str, description: &str) -> Self {
        Self {
            long: long.to_string(),
            short: None,
            description: description.to_string(),
            takes_value: false,
            default: None,
        }
    }

    /// An option that takes a value.
    pub fn value(long: &str, description: &str) -> Self {
        Self {
            takes_value: true,
            ..Self::flag(long, description)
        }
    }

    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    pub fn default(mut self, value: &str) -> Self {
        self.default = Some(value.to_string());
        self
    }

    /// Placeholder shown in help, e.g. `<OUTPUT>` for `--output`.
    pub fn value_name(&self) -> String {
        self.long.to_ascii_uppercase().replace('-', "_")
    }
}

/// Everything needed to parse and document one command.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandSpec {
    pub name: String,
    pub description: String,
    pub arguments: Vec<Argument>,
    pub options: Vec<Opt>,
}

impl CommandSpec {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            ..Self::default()
        }
    }

    pub fn argument(mut self, argument: Argument) -> Self {
        self.arguments.push(argument);
        self
    }

    pub fn option(mut self, option: Opt) -> Self {
        self.options.push(option);
        self
    }

    /// The equivalent `clap` command, used for both parsing and help.
    pub fn to_clap(&self) -> clap::Command {
        let mut command = clap::Command::new(self.name.clone());
        if !self.description.is_empty() {
            command = command.about(self.description.clone());
        }
        for argument in &self.arguments {
            let mut arg = Arg::new(argument.name.clone())
                .help(argument.description.clone())
                .required(argument.required)
                .action(ArgAction::Set);
            if let Some(default) = &argument.default {
                arg = arg.default_value(default.clone());
            }
            command = command.arg(arg);
        }
        for option in &self.options {
            let mut arg = Arg::new(option.long.clone())
                .long(option.long.clone())
                .help(option.description.clone());
            if let Some(short) = option.short {
                arg = arg.short(short);
            }
            arg = if option.takes_value {
                arg.action(ArgAction::Set).value_name(option.value_name())
            } else {
                arg.action(ArgAction::SetTrue)
            };
            if let Some(default) = option.default.as_ref().filter(|_| option.takes_value) {
                arg = arg.default_value(default.clone());
            }
            command = command.arg(arg);
        }
        command
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_set_fields() {
        let spec = CommandSpec::new("greet", "Say hello")
            .argument(Argument::required("name", "Who to greet"))
            .argument(Argument::optional("greeting", "Opening word").default("Hello"))
            .option(Opt::value("output-file", "Where to write").short('o'));

        assert!(spec.arguments[0].required);
        assert!(!spec.arguments[1].required);
        assert_eq!(spec.arguments[1].default.as_deref(), Some("Hello"));
        assert_eq!(spec.options[0].short, Some('o'));
        assert_eq!(spec.options[0].value_name(), "OUTPUT_FILE");
    }

    #[test]
    fn clap_command_mirrors_the_declaration() {
        let command = CommandSpec::new("greet", "Say hello")
            .argument(Argument::required("name", "Who to greet"))
            .argument(Argument::optional("greeting", "Opening word").default("Hello"))
            .option(Opt::value("output-file", "Where to write").short('o'))
            .option(Opt::flag("loud", "Shout").default("ignored"))
            .to_clap();
        command.clone().debug_assert();

        assert_eq!(command.get_name(), "greet");
        let args: Vec<_> = command.get_arguments().collect();
        let name = args.iter().find(|a| a.get_id() == "name").unwrap();
        assert!(name.is_positional());
        assert!(name.is_required_set());

        let greeting = args.iter().find(|a| a.get_id() == "greeting").unwrap();
        assert!(!greeting.is_required_set());
        let defaults = greeting.get_default_values();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0].to_str(), Some("Hello"));

        let output = args.iter().find(|a| a.get_id() == "output-file").unwrap();
        assert_eq!(output.get_short(), Some('o'));
        assert_eq!(output.get_long(), Some("output-file"));
        assert_eq!(
            output.get_value_names().map(|names| names[0].as_str()),
            Some("OUTPUT_FILE")
        );

        let loud = args.iter().find(|a| a.get_id() == "loud").unwrap();
        assert!(matches!(loud.get_action(), ArgAction::SetTrue));
    }
}
