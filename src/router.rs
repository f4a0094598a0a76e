//! Command table and dispatch.
//!
//! The table is built once in `main` and only read afterwards. Dispatch
//! matches the first argument by name; anything else falls back to `help`.

use anyhow::Result;
use std::io::{self, Write};

/// Signature shared by every command handler: the arguments after the name.
pub type Handler = Box<dyn Fn(&[String]) -> Result<()>>;

/// Name of the fallback command.
pub const HELP: &str = "help";

/// A named, described command.
pub struct Command {
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
    handler: Handler,
}

impl Command {
    pub fn new(
        name: &'static str,
        usage: &'static str,
        description: &'static str,
        handler: impl Fn(&[String]) -> Result<()> + 'static,
    ) -> Self {
        Self {
            name,
            usage,
            description,
            handler: Box::new(handler),
        }
    }

    fn invoke(&self, args: &[String]) -> Result<()> {
        (self.handler)(args)
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("usage", &self.usage)
            .finish_non_exhaustive()
    }
}

/// Ordered, immutable command registry.
#[derive(Debug)]
pub struct CommandTable {
    commands: Vec<Command>,
}

impl CommandTable {
    /// Build the table. Names must be unique and include `help`.
    pub fn new(commands: Vec<Command>) -> Result<Self> {
        for (i, command) in commands.iter().enumerate() {
            if commands[..i].iter().any(|c| c.name == command.name) {
                anyhow::bail!("Duplicate command registered: {}", command.name);
            }
        }
        if !commands.iter().any(|c| c.name == HELP) {
            anyhow::bail!("Command table has no '{}' command", HELP);
        }
        Ok(Self { commands })
    }

    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    fn help(&self) -> &Command {
        // `new` guarantees presence
        self.commands
            .iter()
            .find(|c| c.name == HELP)
            .unwrap_or(&self.commands[0])
    }
}

/// Dispatch `args` (program name excluded) against `table`.
pub fn route(table: &CommandTable, args: &[String]) -> Result<()> {
    route_to(table, args, &mut io::stdout())
}

/// [`route`] with the unknown-command notice written to `out`.
pub fn route_to(table: &CommandTable, args: &[String], out: &mut dyn Write) -> Result<()> {
    let Some((name, rest)) = args.split_first() else {
        return table.help().invoke(&[]);
    };

    match table.get(name) {
        Some(command) => {
            tracing::debug!(command = command.name, "dispatching");
            command.invoke(rest)
        }
        None => {
            writeln!(out, "Unknown command: {}", name)?;
            writeln!(out)?;
            out.flush()?;
            table.help().invoke(rest)
        }
    }
}
