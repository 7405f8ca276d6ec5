//! Subcommand definitions and their registered form.

use std::fmt;
use std::sync::Arc;

use crate::Args;
use crate::config::Config;
use crate::error::{ArgsError, ArgsResult};

/// In-process subcommand handler.
///
/// Receives the [`Args`] instance that dispatched it, the command's primary
/// name, the positionals following the command token and the resolved
/// options. Its return value is discarded.
pub type Handler = Arc<dyn Fn(&Args, &str, &[String], &Config) + Send + Sync>;

/// Selector tokens for a command: the primary name followed by aliases.
///
/// Converting from an array folds the aliases into the name, so
/// `["uninstall", "rm"]` registers `uninstall` with alias `rm`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandName(Vec<String>);

impl From<&str> for CommandName {
    fn from(value: &str) -> Self {
        Self(vec![value.to_owned()])
    }
}

impl From<String> for CommandName {
    fn from(value: String) -> Self {
        Self(vec![value])
    }
}

impl<const N: usize> From<[&str; N]> for CommandName {
    fn from(values: [&str; N]) -> Self {
        Self(values.iter().map(|v| (*v).to_owned()).collect())
    }
}

impl From<Vec<String>> for CommandName {
    fn from(values: Vec<String>) -> Self {
        Self(values)
    }
}

/// Builder describing a subcommand before registration.
///
/// A command without a handler dispatches to an external executable named
/// `<binary>-<command>`.
///
/// # Examples
///
/// ```
/// use argsmith::CommandDef;
/// let install = CommandDef::new("install", "Install packages")
///     .alias("i")
///     .handler(|_, name, sub, _| assert_eq!((name, sub.len()), ("install", 0)));
/// assert_eq!(install.selectors(), ["install", "i"]);
/// ```
#[derive(Clone)]
pub struct CommandDef {
    pub(crate) name: CommandName,
    pub(crate) description: String,
    pub(crate) handler: Option<Handler>,
}

impl CommandDef {
    /// Start describing a command.
    #[must_use]
    pub fn new(name: impl Into<CommandName>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            handler: None,
        }
    }

    /// Add an alias.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.name.0.push(alias.into());
        self
    }

    /// Add several aliases.
    #[must_use]
    pub fn aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.name.0.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Run `f` in-process instead of dispatching to an external binary.
    #[must_use]
    pub fn handler<F>(mut self, f: F) -> Self
    where
        F: Fn(&Args, &str, &[String], &Config) + Send + Sync + 'static,
    {
        self.handler = Some(Arc::new(f));
        self
    }

    /// Every token that will select this command.
    #[must_use]
    pub fn selectors(&self) -> &[String] {
        &self.name.0
    }
}

impl fmt::Debug for CommandDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDef")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("handler", &self.handler.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// What running a command does.
#[derive(Clone)]
pub(crate) enum CommandAction {
    Handler(Handler),
    Help,
    External,
}

/// A registered subcommand.
#[derive(Clone)]
pub struct Command {
    name: String,
    aliases: Vec<String>,
    description: String,
    pub(crate) action: CommandAction,
    pub(crate) builtin: bool,
}

impl Command {
    /// Primary name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Alternative selectors.
    #[must_use]
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Help text.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns `true` when the command runs in-process.
    #[must_use]
    pub const fn is_in_process(&self) -> bool {
        !matches!(self.action, CommandAction::External)
    }

    /// Returns `true` when `token` is the name or one of the aliases.
    #[must_use]
    pub fn matches(&self, token: &str) -> bool {
        self.selectors().any(|selector| selector == token)
    }

    /// Name followed by aliases.
    pub fn selectors(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    /// Usage label shown in help, e.g. `uninstall, u, rm`.
    #[must_use]
    pub fn usage_label(&self) -> String {
        self.selectors().collect::<Vec<_>>().join(", ")
    }

    pub(crate) fn register(def: CommandDef, action: Option<CommandAction>, builtin: bool) -> ArgsResult<Self> {
        let mut selectors = def.name.0.into_iter();
        let name = selectors
            .next()
            .ok_or_else(|| ArgsError::invalid_command("", "a command needs a name"))?;
        let aliases: Vec<String> = selectors.collect();
        for selector in std::iter::once(&name).chain(&aliases) {
            validate_selector(selector)?;
        }
        if let Some(dup) = aliases
            .iter()
            .enumerate()
            .find(|(i, alias)| **alias == name || aliases.iter().take(*i).any(|a| a == *alias))
            .map(|(_, alias)| alias)
        {
            return Err(ArgsError::DuplicateCommand {
                selector: dup.clone(),
            });
        }
        Ok(Self {
            name,
            aliases,
            description: def.description,
            action: action.unwrap_or_else(|| {
                def.handler
                    .map_or(CommandAction::External, CommandAction::Handler)
            }),
            builtin,
        })
    }
}

fn validate_selector(selector: &str) -> ArgsResult<()> {
    if selector.trim().is_empty() {
        return Err(ArgsError::invalid_command(selector, "must be non-empty"));
    }
    if selector.starts_with('-') {
        return Err(ArgsError::invalid_command(
            selector,
            "must not start with '-'",
        ));
    }
    if selector.chars().any(char::is_whitespace) {
        return Err(ArgsError::invalid_command(
            selector,
            "must not contain whitespace",
        ));
    }
    Ok(())
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = match self.action {
            CommandAction::Handler(_) => "handler",
            CommandAction::Help => "help",
            CommandAction::External => "external",
        };
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("description", &self.description)
            .field("action", &action)
            .finish()
    }
}
