//! Ordered collections of registered options, commands and examples.
//!
//! Registration enforces the naming invariants up front: every option has
//! exactly one short and one long form, short forms never collide, and no two
//! commands share a selector. Insertion order is kept; help output sorts a
//! copy, so rendering never changes which entry a lookup returns.

mod command;
mod example;
mod option;

pub use command::{Command, CommandDef, CommandName, Handler};
pub use example::Example;
pub use option::{ArgOption, OptionDef, OptionName, mapping_key};

pub(crate) use command::CommandAction;

use crate::error::{ArgsError, ArgsResult};

/// Which collection [`Registry::lookup`] searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Registered options.
    Options,
    /// Registered commands.
    Commands,
}

/// A lookup hit.
#[derive(Debug, Clone, Copy)]
pub enum Entry<'a> {
    /// Matched an option's short or long form.
    Option(&'a ArgOption),
    /// Matched a command's name or alias.
    Command(&'a Command),
}

/// Registered options, commands and examples.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    options: Vec<ArgOption>,
    commands: Vec<Command>,
    examples: Vec<Example>,
    default_command: Option<String>,
}

impl Registry {
    /// Options in registration order.
    #[must_use]
    pub fn options(&self) -> &[ArgOption] {
        &self.options
    }

    /// Commands in registration order.
    #[must_use]
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Examples in registration order.
    #[must_use]
    pub fn examples(&self) -> &[Example] {
        &self.examples
    }

    /// Command dispatched when no subcommand token is given.
    #[must_use]
    pub fn default_command(&self) -> Option<&Command> {
        self.default_command
            .as_deref()
            .and_then(|name| self.find_command(name))
    }

    /// Find the first entry of `kind` whose usage forms contain `token`.
    ///
    /// Entries are scanned in registration order, so the earliest
    /// registration wins.
    #[must_use]
    pub fn lookup(&self, token: &str, kind: EntryKind) -> Option<Entry<'_>> {
        match kind {
            EntryKind::Options => self.find_option(token).map(Entry::Option),
            EntryKind::Commands => self.find_command(token).map(Entry::Command),
        }
    }

    /// Find an option by short or long form.
    #[must_use]
    pub fn find_option(&self, token: &str) -> Option<&ArgOption> {
        self.options.iter().find(|option| option.matches(token))
    }

    /// Find a command by name or alias.
    #[must_use]
    pub fn find_command(&self, token: &str) -> Option<&Command> {
        self.commands.iter().find(|command| command.matches(token))
    }

    pub(crate) fn add_option(&mut self, def: OptionDef, builtin: bool) -> ArgsResult<()> {
        let long = def.name.long();
        if self.options.iter().any(|o| o.long() == long) {
            return Err(ArgsError::DuplicateOption {
                long: long.to_owned(),
            });
        }
        let used_shorts = self.options.iter().filter_map(ArgOption::short);
        let option = ArgOption::register(def, used_shorts, builtin)?;
        tracing::debug!(
            short = option.short().unwrap_or_default(),
            long = option.long(),
            kind = ?option.kind(),
            builtin,
            "registered option"
        );
        self.options.push(option);
        Ok(())
    }

    pub(crate) fn add_command(
        &mut self,
        def: CommandDef,
        action: Option<CommandAction>,
        builtin: bool,
    ) -> ArgsResult<()> {
        let command = Command::register(def, action, builtin)?;
        if let Some(selector) = command
            .selectors()
            .find(|selector| self.find_command(selector).is_some())
        {
            return Err(ArgsError::DuplicateCommand {
                selector: selector.to_owned(),
            });
        }
        tracing::debug!(
            name = command.name(),
            aliases = ?command.aliases(),
            in_process = command.is_in_process(),
            builtin,
            "registered command"
        );
        self.commands.push(command);
        Ok(())
    }

    pub(crate) fn add_example(&mut self, example: Example) {
        tracing::debug!(usage = example.usage(), "registered example");
        self.examples.push(example);
    }

    pub(crate) fn set_default_command(&mut self, name: &str) -> ArgsResult<()> {
        let primary = self
            .find_command(name)
            .map(|command| command.name().to_owned())
            .ok_or_else(|| ArgsError::UnknownCommand {
                name: name.to_owned(),
            })?;
        self.default_command = Some(primary);
        Ok(())
    }

    /// Drop the built-in help and version entries so a parse can re-add
    /// them according to its own runtime configuration.
    pub(crate) fn remove_builtins(&mut self) {
        self.options.retain(|option| !option.builtin);
        self.commands.retain(|command| !command.builtin);
    }

    /// Remove every registration.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
