pub mod help;
pub mod init;

use anyhow::Result;

use crate::config::Settings;
use crate::router::{Command, CommandTable, HELP};

/// Name, usage line, and description of a registered command.
pub struct CommandSpec {
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
}

/// Registered commands, in help order.
pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: HELP,
        usage: "help",
        description: "Prints this help message.",
    },
    CommandSpec {
        name: "init",
        usage: "init [version]",
        description: "Initializes a new kirok project.",
    },
];

/// Build the command table for the CLI.
pub fn table(settings: Settings) -> Result<CommandTable> {
    let mut commands = Vec::with_capacity(COMMANDS.len());
    for spec in COMMANDS {
        let command = match spec.name {
            HELP => Command::new(spec.name, spec.usage, spec.description, |_| {
                help::execute()
            }),
            "init" => {
                let settings = settings.clone();
                Command::new(spec.name, spec.usage, spec.description, move |args| {
                    init::execute(args, &settings)
                })
            }
            other => anyhow::bail!("No handler for command: {}", other),
        };
        commands.push(command);
    }
    CommandTable::new(commands)
}
